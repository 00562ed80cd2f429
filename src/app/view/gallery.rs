// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/gallery.rs
//
// Render a gallery page as text.

use std::fmt::Write;

use crate::app::model::GalleryState;

pub fn view(gallery: &GalleryState, total_images: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Page {} / {}  ({total_images} images)",
        gallery.page, gallery.total_pages
    );
    for item in &gallery.thumbnails {
        let _ = writeln!(out, "  Image #{:<5} {}", item.index + 1, item.path);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Thumbnail;

    #[test]
    fn lists_one_based_image_numbers() {
        let gallery = GalleryState {
            page: 2,
            total_pages: 3,
            thumbnails: vec![Thumbnail {
                path: "/event/a.jpg".into(),
                index: 20,
                thumbnail: "data:image/jpeg;base64,".into(),
            }],
        };
        let text = view(&gallery, 45);
        assert!(text.starts_with("Page 2 / 3  (45 images)"));
        assert!(text.contains("Image #21"));
        assert!(text.contains("/event/a.jpg"));
    }
}

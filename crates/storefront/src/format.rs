//! Display helpers shared by presentation layers.

/// Directory product images are served from when given as bare file names.
pub const IMAGE_DIR: &str = "./assets/images";

/// Resolve a product image reference to something a view can load.
///
/// Absolute `http`/`https` URLs are returned unchanged; anything else is
/// treated as a file name under [`IMAGE_DIR`].
#[must_use]
pub fn image_path(image: &str) -> String {
    if image.starts_with("http") {
        image.to_string()
    } else {
        format!("{IMAGE_DIR}/{image}")
    }
}

use gloo::file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, HtmlAnchorElement};

/// Offer `bytes` to the browser as a download named `file_name`.
pub fn save_bytes(file_name: &str, bytes: &[u8]) -> Result<(), String> {
    let document = gloo::utils::document();
    let blob = Blob::new_with_options(bytes, Some("application/octet-stream"));
    // Revoked when dropped at the end of this function.
    let url = ObjectUrl::from(blob);

    let a = document
        .create_element("a")
        .map_err(|_| "document: create_element failed".to_string())?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "document: anchor cast failed".to_string())?;
    let _ = a.style().set_property("display", "none");
    a.set_href(&url);
    a.set_download(file_name);

    let body = gloo::utils::body();
    body.append_child(&a)
        .map_err(|_| "document: append anchor failed".to_string())?;
    a.click();
    a.remove();
    Ok(())
}

/// Files carried by a drop event, in drop order.
pub fn dropped_files(e: &DragEvent) -> Vec<File> {
    let Some(list) = e.data_transfer().and_then(|dt| dt.files()) else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

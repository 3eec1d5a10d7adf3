/// Browser-side file downloads and blocking notices
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::shared::data_table::TableError;

pub const CSV_MIME: &str = "text/csv;charset=utf-8;";

/// Offers `content` to the user as a downloaded file
pub fn download_text_file(content: &str, filename: &str, mime: &str) -> Result<(), TableError> {
    let blob = create_blob(content, mime)?;
    download_blob(&blob, filename)
}

/// Shows a blocking browser notice
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn create_blob(content: &str, mime: &str) -> Result<Blob, TableError> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| TableError::Download(format!("Failed to create blob: {:?}", e)))
}

/// Starts the download through a temporary anchor element
fn download_blob(blob: &Blob, filename: &str) -> Result<(), TableError> {
    let fail = |what: &str, e: wasm_bindgen::JsValue| TableError::Download(format!("{}: {:?}", what, e));

    let window = web_sys::window().ok_or_else(|| TableError::Download("No window object".into()))?;
    let document = window
        .document()
        .ok_or_else(|| TableError::Download("No document object".into()))?;
    let body = document
        .body()
        .ok_or_else(|| TableError::Download("No body element".into()))?;

    let url = Url::create_object_url_with_blob(blob).map_err(|e| fail("Failed to create object URL", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| fail("Failed to create anchor", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| fail("Failed to cast to anchor", e.into()))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| fail("Failed to set style", e))?;

    body.append_child(&anchor)
        .map_err(|e| fail("Failed to append anchor", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| fail("Failed to remove anchor", e))?;

    Url::revoke_object_url(&url).map_err(|e| fail("Failed to revoke URL", e))?;

    Ok(())
}

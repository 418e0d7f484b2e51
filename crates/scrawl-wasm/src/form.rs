//! `UploadForm` → browser `FormData`.

use scrawl_editor::upload::UploadForm;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

pub fn to_form_data(form: &UploadForm) -> Result<FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(form.file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(form.file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let data = FormData::new()?;
    data.append_with_blob_and_filename(&form.file.field, &blob, &form.file.file_name)?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value)?;
    }
    Ok(data)
}

//! Form and media helpers: image preview, required-field validation,
//! clipboard copy and date display.

use crate::config::DEFAULT_NOTICE_MS;
use crate::dom::{self, escape_html};
use crate::error::{ClientError, describe};
use crate::notifier::{Level, Notify};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, File, FileReader, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement};

pub const PREVIEW_ID: &str = "nft-preview";
pub const INVALID_DATE: &str = "Invalid Date";

const COPY_OK: &str = "✅ Copied to clipboard";
const COPY_FAILED: &str = "❌ Copy failed";

// ── Image preview ──

/// Show the first file picked in `input` in `#nft-preview`.
/// Nothing happens if no file is selected or the preview element is missing.
pub async fn preview_image(input: &HtmlInputElement) -> Result<(), ClientError> {
    let Some(file) = input.files().and_then(|files| files.item(0)) else {
        return Ok(());
    };
    let data_url = read_as_data_url(&file).await?;

    let Some(preview) = dom::by_id_typed::<HtmlImageElement>(PREVIEW_ID) else {
        return Ok(());
    };
    preview.set_src(&data_url);
    let _ = preview.style().set_property("display", "block");
    Ok(())
}

/// Read a file into a `data:` URL.
pub async fn read_as_data_url(file: &File) -> Result<String, ClientError> {
    let reader = FileReader::new()?;
    let done = Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader.read_as_data_url(file)?;

    let outcome = JsFuture::from(done).await;
    reader.set_onload(None);
    reader.set_onerror(None);
    outcome.map_err(|e| ClientError::Dom(format!("file read failed: {}", describe(&e))))?;

    reader
        .result()?
        .as_string()
        .ok_or_else(|| ClientError::Dom("file reader result is not a string".to_string()))
}

// ── Validation ──

/// A form control that must not be left blank.
pub trait RequiredField {
    fn name(&self) -> String;
    fn value(&self) -> String;
    fn focus(&self);
}

/// Check fields in order and stop at the first blank one: report it, focus
/// it, and return `false`. Later fields are not looked at.
pub fn validate_fields<F: RequiredField, N: Notify>(fields: &[F], notifier: &N) -> bool {
    for field in fields {
        if field.value().trim().is_empty() {
            notifier.notify(
                &format!("❌ Field {} is required", escape_html(&field.name())),
                Level::Error,
                DEFAULT_NOTICE_MS,
            );
            field.focus();
            return false;
        }
    }
    true
}

pub enum FormField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl RequiredField for FormField {
    fn name(&self) -> String {
        match self {
            FormField::Input(el) => el.name(),
            FormField::TextArea(el) => el.name(),
        }
    }

    fn value(&self) -> String {
        match self {
            FormField::Input(el) => el.value(),
            FormField::TextArea(el) => el.value(),
        }
    }

    fn focus(&self) {
        let _ = match self {
            FormField::Input(el) => el.focus(),
            FormField::TextArea(el) => el.focus(),
        };
    }
}

/// Required inputs and textareas under `form`, in document order.
pub fn required_fields(form: &Element) -> Vec<FormField> {
    dom::query_all_within(form, "input[required], textarea[required]")
        .into_iter()
        .filter_map(|el| match el.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(FormField::Input(input)),
            Err(el) => el.dyn_into::<HtmlTextAreaElement>().ok().map(FormField::TextArea),
        })
        .collect()
}

/// Validate the form with id `form_id`. A missing form counts as invalid.
pub fn validate_form<N: Notify>(form_id: &str, notifier: &N) -> bool {
    let Some(form) = dom::by_id(form_id) else {
        tracing::warn!(%form_id, "form not found");
        return false;
    };
    validate_fields(&required_fields(&form), notifier)
}

// ── Clipboard ──

pub async fn copy_to_clipboard<N: Notify>(text: &str, notifier: &N) {
    report_copy(write_clipboard(text).await, notifier);
}

fn report_copy<N: Notify>(result: Result<(), ClientError>, notifier: &N) {
    match result {
        Ok(()) => notifier.notify(COPY_OK, Level::Success, DEFAULT_NOTICE_MS),
        Err(e) => {
            tracing::warn!(error = %e, "clipboard write failed");
            notifier.notify(COPY_FAILED, Level::Error, DEFAULT_NOTICE_MS);
        }
    }
}

async fn write_clipboard(text: &str) -> Result<(), ClientError> {
    let clipboard = dom::window().navigator().clipboard();
    // absent outside secure contexts
    if clipboard.is_undefined() {
        return Err(ClientError::Dom("clipboard API unavailable".to_string()));
    }
    JsFuture::from(clipboard.write_text(text)).await?;
    Ok(())
}

// ── Dates ──

/// Format an ISO-like timestamp as `dd.mm.yyyy, HH:MM` in local time.
///
/// Timestamps with an offset are converted to local time, timestamps without
/// one are taken as local already, and a bare date means UTC midnight.
pub fn format_date(value: &str) -> String {
    match parse_local(value.trim()) {
        Some(dt) => dt.format("%d.%m.%Y, %H:%M").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_local(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    let midnight = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().with_timezone(&Local).naive_local())
}

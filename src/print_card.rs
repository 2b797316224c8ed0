//! Printable card
//!
//! A standalone A4 page opened in a new tab for the browser's print dialog.

/// Card heading
pub const CARD_HEADING: &str = "Happy Birthday Mum";
/// Line under the heading
pub const CARD_LINE: &str = "For all the quiet ways you held our days together";
/// Footer note
pub const CARD_FOOTER: &str = "Made with love";

const CARD_STYLE: &str = "\
      @page { size: A4; margin:20mm; }
      body{font-family: 'Playfair Display', serif; background:#fff; color:#2f2420; margin:0; padding:32px}
      .card{border:6px solid #efe6dc;padding:36px;border-radius:8px;max-width:720px;margin:0 auto;text-align:center}
      h1{margin:0 0 8px;font-size:40px}
      p{margin:0 0 12px;color:#6f5b4d}
      footer{margin-top:18px;color:#9a8f87;font-size:12px}";

/// The full printable document
pub fn printable_card_html() -> String {
    format!(
        "<html><head><meta charset=\"utf-8\"><title>Printable Card</title>\n\
         <style>\n{CARD_STYLE}\n</style></head><body><div class=\"card\">\
         <h1>{CARD_HEADING}</h1><p>{CARD_LINE}</p><footer>{CARD_FOOTER}</footer>\
         </div></body></html>\n"
    )
}

/// Open the printable card in a new tab (WASM only).
/// A blocked popup is logged and otherwise ignored.
#[cfg(target_arch = "wasm32")]
pub fn open_printable_card(window: &web_sys::Window) {
    use wasm_bindgen::JsCast;

    let popup = match window.open_with_url_and_target("", "_blank") {
        Ok(Some(popup)) => popup,
        Ok(None) => {
            log::warn!("Printable card popup was blocked");
            return;
        }
        Err(e) => {
            log::warn!("Failed to open printable card: {:?}", e);
            return;
        }
    };

    // The popup's document belongs to another realm, so `instanceof` checks fail
    let Some(doc) = popup
        .document()
        .map(|d| d.unchecked_into::<web_sys::HtmlDocument>())
    else {
        return;
    };

    let html = js_sys::Array::of1(&wasm_bindgen::JsValue::from(printable_card_html()));
    if let Err(e) = doc.write(&html) {
        log::warn!("Failed to write printable card: {:?}", e);
    }
    let _ = doc.close();
}

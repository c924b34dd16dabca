//! Access-gated regions.
//!
//! `[members-only]` … `[/members-only]` spans are resolved before any other
//! stage runs: kept (without the markers) for signed-in viewers, replaced
//! wholesale by a localized sign-in prompt for everyone else.

use std::borrow::Cow;

use crate::Locale;
use crate::strings::strings;
use crate::util::escape_html;

/// Opening marker of a gated region.
pub const GATE_OPEN: &str = "[members-only]";
/// Closing marker of a gated region.
pub const GATE_CLOSE: &str = "[/members-only]";

/// Resolve every gated region in `document`.
///
/// Each span is handled independently. An opening marker without a closing
/// marker gates everything after it. Documents without markers are
/// returned unchanged.
pub(crate) fn resolve<'a>(
    document: &'a str,
    authenticated: bool,
    locale: Locale,
    sign_in_path: &str,
) -> Cow<'a, str> {
    if !document.contains(GATE_OPEN) {
        return Cow::Borrowed(document);
    }

    let mut out = String::with_capacity(document.len());
    let mut rest = document;
    let mut gated = 0usize;

    while let Some(start) = rest.find(GATE_OPEN) {
        out.push_str(&rest[..start]);
        let body = &rest[start + GATE_OPEN.len()..];

        let (inner, next) = match body.find(GATE_CLOSE) {
            Some(end) => (&body[..end], &body[end + GATE_CLOSE.len()..]),
            None => (body, ""),
        };

        if authenticated {
            out.push_str(inner);
        } else {
            out.push('\n');
            out.push_str(&prompt(locale, sign_in_path));
            out.push('\n');
        }

        gated += 1;
        rest = next;
    }
    out.push_str(rest);

    tracing::debug!(regions = gated, authenticated, "Resolved gated regions");
    Cow::Owned(out)
}

/// Sign-in prompt shown in place of gated content.
fn prompt(locale: Locale, sign_in_path: &str) -> String {
    let s = strings(locale);
    format!(
        r#"<div class="gate" role="note"><h3 class="gate-title">{}</h3><p class="gate-body">{}</p><a class="gate-cta" href="{}">{}</a></div>"#,
        s.gate_title,
        s.gate_body,
        escape_html(sign_in_path),
        s.gate_cta,
    )
}

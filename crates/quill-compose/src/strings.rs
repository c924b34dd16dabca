//! Localized copy emitted by the engine.

use crate::Locale;

/// Fixed strings for one locale.
pub(crate) struct Strings {
    pub(crate) gate_title: &'static str,
    pub(crate) gate_body: &'static str,
    pub(crate) gate_cta: &'static str,
    pub(crate) anchor_label: &'static str,
    pub(crate) details_summary: &'static str,
    pub(crate) play_video: &'static str,
    pub(crate) track_fallback: &'static str,
}

const JA: Strings = Strings {
    gate_title: "この続きはメンバー限定です",
    gate_body: "ログインすると、この記事の続きをすべて読むことができます。",
    gate_cta: "ログインして続きを読む",
    anchor_label: "この見出しへのリンクをコピー",
    details_summary: "詳細",
    play_video: "動画を再生",
    track_fallback: "曲を再生",
};

const EN: Strings = Strings {
    gate_title: "The rest of this post is for members",
    gate_body: "Sign in to keep reading the full article.",
    gate_cta: "Sign in to continue",
    anchor_label: "Copy link to this heading",
    details_summary: "Details",
    play_video: "Play video",
    track_fallback: "Play track",
};

/// Strings for the given locale.
pub(crate) fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::Ja => &JA,
        Locale::En => &EN,
    }
}

/// Call-to-action label for a merchant card.
pub(crate) fn merchant_cta(locale: Locale, merchant: &str) -> String {
    match locale {
        Locale::Ja => format!("{merchant}で見る"),
        Locale::En => format!("View on {merchant}"),
    }
}

//! Commerce link detection and merchant cards.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::Locale;
use crate::placeholder::{Placeholders, RegionKind};
use crate::strings::merchant_cta;
use crate::util::escape_html;

static PRODUCT_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:dp|gp/product)/([A-Z0-9]{10})(?:[/?#&]|$)").unwrap()
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a class="link" href="([^"]*)"(?: target="_blank")?>(.*?)</a>"#).unwrap()
});

/// Known commerce provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Merchant {
    Amazon,
    Rakuten,
}

impl Merchant {
    /// Detect the provider behind `url` from its host.
    pub(crate) fn detect(url: &str) -> Option<Self> {
        let host = host(url)?;
        let labels: Vec<&str> = host.split('.').collect();

        if host == "amzn.to" || host == "amzn.asia" {
            return Some(Self::Amazon);
        }
        if let Some(pos) = labels.iter().position(|l| *l == "amazon")
            && pos + 1 < labels.len()
        {
            return Some(Self::Amazon);
        }
        if host == "rakuten.co.jp" || host.ends_with(".rakuten.co.jp") {
            return Some(Self::Rakuten);
        }
        None
    }

    /// Lowercase identifier used in class names and `data-merchant`.
    pub(crate) fn slug(self) -> &'static str {
        match self {
            Self::Amazon => "amazon",
            Self::Rakuten => "rakuten",
        }
    }

    /// Display name.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Rakuten => "楽天市場",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Amazon => "a",
            Self::Rakuten => "R",
        }
    }

    /// Product image for a product id, where the provider offers one.
    fn image_url(self, product_id: &str) -> Option<String> {
        match self {
            Self::Amazon => Some(format!(
                "https://images-na.ssl-images-amazon.com/images/P/{product_id}.09.LZZZZZZZ.jpg"
            )),
            Self::Rakuten => None,
        }
    }
}

/// Lowercased host of an absolute URL, without `www.` or a port.
fn host(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit('@').next()?;
    let host = authority.split(':').next()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_owned();
    (!host.is_empty()).then_some(host)
}

/// Extract a product id from `/dp/ID` or `/gp/product/ID`.
pub(crate) fn product_id(url: &str) -> Option<&str> {
    PRODUCT_PATH_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Render a merchant card.
///
/// `href` and `label` are inserted as-is; callers pass already-escaped
/// values.
pub(crate) fn card(
    merchant: Merchant,
    href: &str,
    label: &str,
    product_id: Option<&str>,
    locale: Locale,
) -> String {
    let slug = merchant.slug();
    let media = match product_id.and_then(|id| merchant.image_url(id)) {
        Some(src) => format!(
            r#"<img class="merchant-image" src="{}" alt="" loading="lazy">"#,
            escape_html(&src)
        ),
        None => format!(
            r#"<span class="merchant-glyph" aria-hidden="true">{}</span>"#,
            merchant.glyph()
        ),
    };
    let cta = escape_html(&merchant_cta(locale, merchant.name()));
    format!(
        r#"<a class="merchant-card merchant-{slug}" href="{href}" target="_blank" data-merchant="{slug}"><span class="merchant-media">{media}</span><span class="merchant-body"><span class="merchant-label">{label}</span><span class="merchant-cta">{cta}</span></span></a>"#
    )
}

/// Turn commerce links produced by the link pass into merchant cards.
///
/// Each card is protected as an embed. Links to other hosts are left as
/// they are.
pub(crate) fn enrich_links(text: &str, locale: Locale, regions: &mut Placeholders) -> String {
    LINK_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let href = &caps[1];
            let label = &caps[2];
            match Merchant::detect(href) {
                Some(merchant) => {
                    let id = product_id(href);
                    tracing::debug!(merchant = merchant.slug(), product = ?id, "Enriched commerce link");
                    regions.protect(RegionKind::Embed, card(merchant, href, label, id, locale))
                }
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}

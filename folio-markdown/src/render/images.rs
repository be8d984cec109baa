//! Image rewriting: lazy loading, default sizing class and asset URLs.
//!
//! Markdown images are emitted through [`image_tag`]. Author-written `<img>`
//! tags inside raw HTML go through [`rewrite_img_tags`], which applies the
//! same policy to the existing attribute list. In both cases an explicit
//! author class is kept exactly as written.
use std::sync::LazyLock;

use html_escape::encode_double_quoted_attribute;
use regex::Regex;

use super::RenderOptions;
use crate::utils::{process_html_elements, regex_or_never};

static IMG_TAG_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)<img\b([^>]*?)\s*(/?)>"));
static LOADING_ATTR_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)\sloading\s*="));
static CLASS_ATTR_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)\sclass\s*="));
static SRC_ATTR_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r#"(?i)(\ssrc\s*=\s*")([^"]*)(")"#));

/// Whether `src` should be left alone by [`resolve_asset_url`].
fn is_absolute_url(src: &str) -> bool {
  src.starts_with("http")
    || src.starts_with("//")
    || src.starts_with("data:")
    || src.starts_with('#')
}

/// Prefix a relative image source with `base`, with exactly one `/` between
/// them. Absolute URLs, protocol-relative URLs, data URIs and fragments are
/// returned unchanged, as is everything when `base` is unset or empty.
#[must_use]
pub fn resolve_asset_url(src: &str, base: Option<&str>) -> String {
  match base {
    Some(base) if !base.is_empty() && !is_absolute_url(src) => {
      format!(
        "{}/{}",
        base.trim_end_matches('/'),
        src.trim_start_matches('/')
      )
    },
    _ => src.to_string(),
  }
}

/// Build the `<img>` element for a markdown image.
#[must_use]
pub fn image_tag(
  src: &str,
  alt: &str,
  title: Option<&str>,
  class: Option<&str>,
  options: &RenderOptions,
) -> String {
  let src = resolve_asset_url(src, options.asset_base_url.as_deref());
  let mut tag = format!(
    "<img src=\"{}\" alt=\"{}\"",
    encode_double_quoted_attribute(&src),
    encode_double_quoted_attribute(alt)
  );

  if let Some(title) = title {
    tag.push_str(" title=\"");
    tag.push_str(&encode_double_quoted_attribute(title));
    tag.push('"');
  }

  if options.lazy_images {
    tag.push_str(" loading=\"lazy\"");
  }

  let class = class.or_else(|| default_class(options));
  if let Some(class) = class {
    tag.push_str(" class=\"");
    tag.push_str(&encode_double_quoted_attribute(class));
    tag.push('"');
  }

  tag.push_str(" />");
  tag
}

fn default_class(options: &RenderOptions) -> Option<&str> {
  (options.lazy_images && !options.image_class.is_empty())
    .then_some(options.image_class.as_str())
}

/// Apply the image policy to every `<img>` tag in a fragment of raw HTML.
///
/// A `loading="lazy"` attribute is added unless one is present, and the
/// default class is added only when the tag has no `class` attribute.
/// Relative `src` values are resolved against the asset base URL.
#[must_use]
pub fn rewrite_img_tags(html: &str, options: &RenderOptions) -> String {
  if !html.contains("<img") && !html.contains("<IMG") {
    return html.to_string();
  }

  process_html_elements(html, &IMG_TAG_RE, |caps| {
    let mut attrs = caps[1].to_string();

    if let Some(base) = options.asset_base_url.as_deref() {
      attrs = SRC_ATTR_RE
        .replace(&attrs, |src: &regex::Captures| {
          format!(
            "{}{}{}",
            &src[1],
            resolve_asset_url(&src[2], Some(base)),
            &src[3]
          )
        })
        .into_owned();
    }

    if options.lazy_images && !LOADING_ATTR_RE.is_match(&attrs) {
      attrs.push_str(" loading=\"lazy\"");
    }

    if let Some(class) =
      default_class(options).filter(|_| !CLASS_ATTR_RE.is_match(&attrs))
    {
      attrs.push_str(" class=\"");
      attrs.push_str(&encode_double_quoted_attribute(class));
      attrs.push('"');
    }

    if caps[2].is_empty() {
      format!("<img{attrs}>")
    } else {
      format!("<img{attrs} />")
    }
  })
}

#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros used across the workspace.
//!
//! * [`macro@wire_error`] turns an enum into a context-aware error type.
//! * [`macro@Settings`] implements `appwire_kernel::config::ConfigSchema` for a
//!   configuration struct, so it can be materialized from environment variables
//!   or any other key/value source.
//!
//! Examples below are `ignore`d because they need the kernel crate, which
//! depends on this one.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a fully-featured error type.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(..)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source type.
/// * **Conversions**: `From<Source>` for variants made of exactly a `source` field (or a
///   field marked `#[source]`/`#[from]`) and `context`, so `?` works on upstream errors.
///   Variants with extra fields are built by hand.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A variant that wraps a source must also carry `context: Option<Cow<'static, str>>`.
/// 3. Only one `wire_error` enum per module: the generated `format_context` helper is
///    module-private.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[appwire_derive::wire_error]
/// pub enum LoadError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, LoadError> {
///     std::fs::read_to_string("app.toml").context("Reading app.toml")
/// }
/// ```
#[proc_macro_attribute]
pub fn wire_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Derives `ConfigSchema` for a struct with named fields.
///
/// Every field becomes a configuration key. Values are looked up verbatim under
/// the key and coerced through the field type's `FromStr`.
///
/// # Field attributes
///
/// * `#[setting(default = "...")]` - textual default, coerced like a looked-up value.
/// * `#[setting(rename = "KEY")]` - lookup key (defaults to the field name).
/// * `#[setting(secret)]` - the value is masked in logs and error messages.
///
/// `Option<T>` fields are never required; they resolve to `None` when absent.
/// Field types need `FromStr` (with a `Display` error) and `serde::Serialize`; the latter
/// feeds `ConfigSchema::to_map`, whose keys are the lookup keys.
///
/// # Container attributes
///
/// * `#[setting(crate = "path::to::kernel")]` - path of the kernel crate, for users
///   who only depend on the `appwire` facade (`crate = "appwire::kernel"`).
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, serde::Serialize, appwire_derive::Settings)]
/// struct ServerSettings {
///     database_url: String,
///     #[setting(default = "4583")]
///     port: u16,
///     #[setting(secret, rename = "API_TOKEN")]
///     api_token: Option<String>,
/// }
/// ```
#[proc_macro_derive(Settings, attributes(setting))]
pub fn derive_settings(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::settings::expand(input).into()
}

// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded at build time from
//! `assets/i18n/`. The active locale is resolved from the `--lang` flag, then
//! the `[general] language` setting, then the OS locale, then `en-US`.

pub mod fluent;

pub use fluent::I18n;

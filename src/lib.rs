// lib.rs
//! # dautils
//!
//! A collection of small, independent helpers for data-analysis workflows:
//! tabular data manipulation, file and path utilities, string/collection
//! helpers, and dynamic-type validation for the parameter mappings handed to
//! external storage and database clients.
//!
//! Every function is stateless and operates only on its arguments; there is
//! no shared runtime and no component talks to another except by direct
//! call. All fallible operations return typed [`UtilsError`] values; the
//! only logged non-error is removing a tree that is already gone.
//!
//! ## `df_utils`
//!
//! - **Purpose**: DataFrame-style manipulation of in-memory tables.
//! - **Features**: Built around [`df_utils::DfBuilder`], a table of named
//!   columns over string-cell rows:
//!   - Load from CSV, XLS and XLSX files, or merge a whole directory of them
//!     into one frame aligned by column name.
//!   - Extract every member of duplicate row groups on chosen columns.
//!   - Convert string columns to datetime with a chrono format string.
//!   - Generate one-hot dummy columns with the baseline category dropped.
//!   - Drop columns idempotently, ignoring names that do not exist.
//!
//! ## `type_utils`
//!
//! - **Purpose**: Validate dynamically-typed values before trusting them.
//! - **Features**: Kind checks over `serde_json::Value` mappings and lists,
//!   in strict (typed error) and soft (logged boolean) variants, plus
//!   element-wise kind conversion.
//!
//! ## `text_utils`
//!
//! - **Purpose**: String and collection helpers.
//! - **Features**: `[days.]HH:MM:SS` duration parsing, even-split index
//!   computation, duplicate-word filtering, element-frequency counting.
//!
//! ## `file_utils`
//!
//! - **Purpose**: Filesystem helpers.
//! - **Features**: Hidden-file test, directory/file listing, relative-path
//!   expansion, extension checking, safe recursive delete.
//!
//! ## License
//!
//! This project is licensed under the MIT License.

pub mod df_utils;
pub mod error;
pub mod file_utils;
pub mod text_utils;
pub mod type_utils;

pub use error::{Result, UtilsError};

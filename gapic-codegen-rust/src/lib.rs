//! Rust back-end for gapic.
//!
//! Composers turn a [`GapicContext`](gapic_model::GapicContext) into
//! compilation units; [`RustWriter`] renders each unit as a source file of the
//! generated client crate.
//!
//! ```
//! use gapic_codegen::{language::LanguageCodegen, testing};
//! use gapic_codegen_rust::Generator;
//!
//! let files = Generator::new().render(&testing::echo_model()).unwrap();
//! assert_eq!(files[0].path().to_str(), Some("src/lib.rs"));
//! ```

mod composer;
mod generator;
mod naming;
mod type_mapper;
mod writer;

pub use composer::{Composer, ComposerOptions, composers};
pub use gapic_codegen::language::{GenerateResult, LanguageCodegen};
pub use generator::Generator;
pub use type_mapper::RustTypeMapper;
pub use writer::RustWriter;

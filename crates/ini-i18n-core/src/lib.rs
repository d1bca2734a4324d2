#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod args;
mod cldr;
mod compiler;
mod error;
mod language_tag;
mod locale;
mod message;
mod operands;
mod placeholder;
mod plural;
mod printf;
mod types;

pub use args::Arg;
pub use compiler::{CompileWarning, CompiledMessages, compile_messages};
pub use error::{CoreError, CoreResult};
pub use language_tag::{Confidence, LanguageTag};
pub use locale::Locale;
pub use message::{Message, PluralForms, PluralPlaceholder};
pub use operands::Operands;
pub use placeholder::{Piece, Scanner, Token, scan};
pub use plural::{PluralForm, PluralRule, PluralRules};
pub use printf::{Printer, sprintf};
pub use types::{PLURALS_SECTION, SourceEntry, message_key};

#[doc(hidden)]
pub mod __private {
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

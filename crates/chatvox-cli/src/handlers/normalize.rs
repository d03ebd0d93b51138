//! Normalize command handler.

use chatvox_core::normalize;

/// Print `text` as the synthesis engine would receive it.
pub fn execute(text: &str) {
    println!("{}", normalize(text));
}

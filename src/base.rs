pub type TokenId = u32;
pub type Label = u8;

/// Id never handed out by a vocabulary; used for padding.
pub const PAD_ID: TokenId = 0;

pub trait Preprocessor {
    fn normalize(&self, text: &str) -> String;
}

//! The minimal interface a token exposes to downstream consumers.

/// A value that identifies itself by a numeric token code.
///
/// Tokenizers hand out values implementing this trait so that consumers can
/// switch on the code without depending on the concrete token type.
pub trait TokenCode {
    /// The numeric code of this token.
    fn code(&self) -> u16;
}

impl<T: TokenCode + ?Sized> TokenCode for &T {
    #[inline]
    fn code(&self) -> u16 {
        (**self).code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u16);

    impl TokenCode for Fixed {
        fn code(&self) -> u16 {
            self.0
        }
    }

    fn codes<T: TokenCode>(tokens: &[T]) -> Vec<u16> {
        tokens.iter().map(|t| t.code()).collect()
    }

    #[test]
    fn references_forward_code() {
        let token = Fixed(7);
        assert_eq!((&token).code(), 7);
        assert_eq!(codes(&[Fixed(1), Fixed(2)]), vec![1, 2]);
    }
}

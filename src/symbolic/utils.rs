// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
// the collection of utility functions for preprocessing raw input strings

/// Puts a single space between every two characters: "2ab+c" -> "2 a b + c".
/// After this every letter of the input is tokenized as a separate name.
pub fn interleave_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for (i, c) in s.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleave_spaces() {
        assert_eq!(interleave_spaces("2ab+c"), "2 a b + c");
        assert_eq!(interleave_spaces("x"), "x");
        assert_eq!(interleave_spaces(""), "");
    }
}

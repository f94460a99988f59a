//! Format string normalization.
//!
//! Before compilation a format string is:
//! 1. checked for unbalanced or nested brackets,
//! 2. split into blocks (plain text, one `[...]` group or one `{...}` group),
//! 3. `[...]` groups mixing symbol classes are split into homogeneous groups
//!    (`[09a]` becomes `[09][a]`),
//! 4. symbols inside each `[...]` group are sorted so that mandatory symbols
//!    come before optional ones.

use super::error::FormatError;

/// ASCII ellipsis accepted as a spelling of `…` inside `[...]`
const ASCII_ELLIPSIS: &str = "...";
pub const ELLIPSIS: char = '…';

/// Validate and normalize a format string.
pub fn sanitize(format: &str) -> Result<String, FormatError> {
    check_open_braces(format)?;
    let blocks = divide_blocks_with_mixed_characters(get_format_blocks(format));
    Ok(sort_format_blocks(&blocks))
}

/// Reject unbalanced or nested groups; escaped brackets are ignored.
pub fn check_open_braces(format: &str) -> Result<(), FormatError> {
    let mut escape = false;
    let mut square_brace_open = false;
    let mut curly_brace_open = false;

    for (position, ch) in format.chars().enumerate() {
        if ch == '\\' {
            escape = !escape;
            continue;
        }

        if !escape {
            match ch {
                '[' if square_brace_open => return Err(FormatError::NestedBrackets { position }),
                '[' => square_brace_open = true,
                ']' if !square_brace_open => {
                    return Err(FormatError::UnbalancedBrackets { position })
                }
                ']' => square_brace_open = false,
                '{' if curly_brace_open => return Err(FormatError::NestedBrackets { position }),
                '{' => curly_brace_open = true,
                '}' if !curly_brace_open => {
                    return Err(FormatError::UnbalancedBrackets { position })
                }
                '}' => curly_brace_open = false,
                _ => {}
            }
        }
        escape = false;
    }

    if square_brace_open || curly_brace_open {
        return Err(FormatError::UnbalancedBrackets {
            position: format.chars().count(),
        });
    }
    Ok(())
}

/// Split into plain text runs and single bracket groups.
pub fn get_format_blocks(format: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current_block = String::new();
    let mut escape = false;

    for ch in format.chars() {
        if ch == '\\' && !escape {
            escape = true;
            current_block.push(ch);
            continue;
        }

        if (ch == '[' || ch == '{') && !escape {
            if !current_block.is_empty() {
                blocks.push(std::mem::take(&mut current_block));
            }
        }

        current_block.push(ch);

        if (ch == ']' || ch == '}') && !escape {
            blocks.push(std::mem::take(&mut current_block));
        }

        escape = false;
    }

    if !current_block.is_empty() {
        blocks.push(current_block);
    }

    blocks
        .into_iter()
        .map(|block| {
            if block.starts_with('[') {
                block.replace(ASCII_ELLIPSIS, &ELLIPSIS.to_string())
            } else {
                block
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolClass {
    Digit,
    Alpha,
    Special,
}

impl SymbolClass {
    fn of(ch: char) -> Option<Self> {
        if ch.is_ascii_digit() {
            Some(Self::Digit)
        } else if ch.is_ascii_alphabetic() {
            Some(Self::Alpha)
        } else if ch == '-' || ch == '_' {
            Some(Self::Special)
        } else {
            None
        }
    }

    /// Built-in symbols of the other classes
    fn conflicting_symbols(self) -> [char; 4] {
        match self {
            Self::Digit => ['A', 'a', '-', '_'],
            Self::Alpha => ['0', '9', '-', '_'],
            Self::Special => ['0', '9', 'A', 'a'],
        }
    }
}

/// Split `[...]` groups whose symbols belong to different classes.
pub fn divide_blocks_with_mixed_characters(blocks: Vec<String>) -> Vec<String> {
    let mut resulting_blocks = Vec::with_capacity(blocks.len());

    for block in blocks {
        if !block.starts_with('[') {
            resulting_blocks.push(block);
            continue;
        }

        let mut block_buffer = String::new();
        let mut closed = false;
        for ch in block.chars() {
            if ch == '[' {
                block_buffer.push(ch);
                continue;
            }

            if ch == ']' && !block_buffer.ends_with('\\') {
                block_buffer.push(ch);
                resulting_blocks.push(std::mem::take(&mut block_buffer));
                closed = true;
                break;
            }

            if let Some(class) = SymbolClass::of(ch) {
                if block_buffer.contains(&class.conflicting_symbols()[..]) {
                    block_buffer.push(']');
                    resulting_blocks.push(std::mem::take(&mut block_buffer));
                    block_buffer.push('[');
                    block_buffer.push(ch);
                    continue;
                }
            }

            block_buffer.push(ch);
        }

        if !closed && !block_buffer.is_empty() {
            resulting_blocks.push(block_buffer);
        }
    }

    resulting_blocks
}

/// Sort the symbols of each `[...]` group and join all blocks back together.
///
/// `-` and `_` sort as `a` and `A` so that mandatory `_` precedes optional `-`.
pub fn sort_format_blocks(blocks: &[String]) -> String {
    let mut sanitized = String::new();

    for block in blocks {
        let inner = block
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'));

        let Some(inner) = inner else {
            sanitized.push_str(block);
            continue;
        };

        sanitized.push('[');
        if inner.chars().any(|c| matches!(c, '0' | '9' | 'a' | 'A')) {
            let mut symbols: Vec<char> = inner.chars().collect();
            symbols.sort_unstable();
            sanitized.extend(symbols);
        } else {
            let mut symbols: Vec<char> = inner
                .chars()
                .map(|c| match c {
                    '_' => 'A',
                    '-' => 'a',
                    other => other,
                })
                .collect();
            symbols.sort_unstable();
            sanitized.extend(symbols.into_iter().map(|c| match c {
                'A' => '_',
                'a' => '-',
                other => other,
            }));
        }
        sanitized.push(']');
    }

    sanitized
}

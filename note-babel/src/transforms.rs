//! Block-level pipelines
//!
//! Small compositions of the parser and the math normalizer, for callers that
//! want normalized blocks in one step.

use crate::blocks::{Block, BlockKind};
use crate::formats::html::parser::parse_markup;
use crate::math::{normalize_math_content_with, MathOptions};

/// Normalize math in the content of every block except code blocks.
///
/// Ids, kinds and properties are left as they are.
pub fn normalize_block_math(blocks: &[Block], options: &MathOptions) -> Vec<Block> {
    let mut changed = 0usize;
    let normalized = blocks
        .iter()
        .map(|block| {
            if block.kind == BlockKind::Code {
                return block.clone();
            }
            let content = normalize_math_content_with(&block.content, options);
            if content != block.content {
                changed += 1;
            }
            Block {
                content,
                ..block.clone()
            }
        })
        .collect();
    tracing::debug!(blocks = blocks.len(), changed, "normalized block math");
    normalized
}

/// Parse markup, then normalize math in the resulting blocks
///
/// # Example
///
/// ```ignore
/// use note_babel::transforms::markup_to_normalized_blocks;
/// use note_babel::MathOptions;
///
/// let blocks = markup_to_normalized_blocks("<p>x^2</p>", &MathOptions::default());
/// assert_eq!(blocks[0].content, "$x^{2}$");
/// ```
pub fn markup_to_normalized_blocks(markup: &str, options: &MathOptions) -> Vec<Block> {
    normalize_block_math(&parse_markup(markup), options)
}

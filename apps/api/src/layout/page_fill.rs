//! Pagination and page fill.
//!
//! Single greedy pass: blocks are placed top to bottom and a new page starts when
//! the next block would overflow the remaining height. Paragraphs and bullets that
//! overflow are split between lines and continue at the top of the next page.
//! Headings and dividers are never split.

use std::collections::VecDeque;

use crate::errors::AppError;
use crate::layout::blocks::{Block, Page, PageFill, PlacedBlock, TextBlock, BULLET_TEXT_OFFSET};

/// Tolerance for float accumulation when a block exactly fills the page.
const FIT_EPSILON: f32 = 0.01;

/// Splits `blocks` into pages of `content_height` points.
///
/// Empty input yields one empty page, so every document has at least one page.
pub fn paginate(blocks: Vec<Block>, content_height: f32) -> Result<Vec<Page>, AppError> {
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Vec<PlacedBlock> = Vec::new();
    let mut used = 0.0_f32;
    let mut queue: VecDeque<Block> = blocks.into();

    while let Some(block) = queue.pop_front() {
        let height = block.height();
        if used + height <= content_height + FIT_EPSILON {
            current.push(PlacedBlock { y: used, block });
            used += height;
            continue;
        }

        if let Some((head, tail)) = split_block(&block, content_height - used) {
            let head_height = head.height();
            current.push(PlacedBlock { y: used, block: head });
            used += head_height;
            queue.push_front(tail);
        } else if current.is_empty() {
            return Err(AppError::content(
                block.describe(),
                format!(
                    "block is {height:.1}pt tall but a page holds {content_height:.1}pt"
                ),
            ));
        } else {
            queue.push_front(block);
        }

        pages.push(finish_page(pages.len() + 1, std::mem::take(&mut current), used, content_height));
        used = 0.0;
    }

    pages.push(finish_page(pages.len() + 1, current, used, content_height));
    Ok(pages)
}

/// Cuts a paragraph or bullet after the last line that fits in `room`.
///
/// The head keeps `space_before`, the tail keeps `space_after`. A bullet's tail is a
/// paragraph aligned with the bullet text so the glyph is drawn once. `None` when
/// the block cannot be split or not even its first line fits.
fn split_block(block: &Block, room: f32) -> Option<(Block, Block)> {
    let text = match block {
        Block::Paragraph(t) | Block::Bullet(t) => t,
        Block::Heading(_) | Block::Divider(_) => return None,
    };
    let line_height = text.style.line_height;
    if line_height <= 0.0 || text.lines.len() < 2 {
        return None;
    }
    let fitting = ((room - text.space_before + FIT_EPSILON) / line_height).floor();
    if fitting < 1.0 {
        return None;
    }
    let at = (fitting as usize).min(text.lines.len() - 1);

    let head = TextBlock {
        lines: text.lines[..at].to_vec(),
        space_after: 0.0,
        ..text.clone()
    };
    let tail = TextBlock {
        lines: text.lines[at..].to_vec(),
        space_before: 0.0,
        ..text.clone()
    };
    Some(match block {
        Block::Bullet(_) => (
            Block::Bullet(head),
            Block::Paragraph(TextBlock {
                indent: tail.indent + BULLET_TEXT_OFFSET,
                ..tail
            }),
        ),
        _ => (Block::Paragraph(head), Block::Paragraph(tail)),
    })
}

fn finish_page(number: usize, blocks: Vec<PlacedBlock>, used: f32, available: f32) -> Page {
    Page {
        number,
        blocks,
        fill: analyze_page_fill(used, available),
    }
}

pub fn analyze_page_fill(used_height: f32, available_height: f32) -> PageFill {
    let fill_fraction = if available_height > 0.0 {
        (used_height / available_height).clamp(0.0, 1.0)
    } else {
        0.0
    };
    PageFill {
        used_height,
        available_height,
        fill_fraction,
    }
}

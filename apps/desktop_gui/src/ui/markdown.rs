//! Markdown rendering for slide content.
//!
//! Slide bodies come back from the service as markdown. `parse_blocks` turns
//! the text into flat styled blocks with pulldown-cmark, and `show` lays those
//! blocks out as egui labels. Raw HTML is skipped.

use eframe::egui::{self, text::LayoutJob, Color32, FontId, TextFormat};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    /// `marker` is the item number for ordered lists, `None` for bullets.
    ListItem {
        depth: usize,
        marker: Option<u64>,
    },
    CodeBlock,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

impl Block {
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

pub fn parse_blocks(text: &str) -> Vec<Block> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut builder = BlockBuilder::default();
    for event in Parser::new(text) {
        builder.process_event(event);
    }
    builder.finish()
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    kind: Option<BlockKind>,
    spans: Vec<Span>,
    bold: usize,
    italic: usize,
    in_code_block: bool,
    /// Next number per open list; `None` for unordered lists.
    lists: Vec<Option<u64>>,
}

impl BlockBuilder {
    fn style(&self) -> SpanStyle {
        SpanStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            code: self.in_code_block,
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text, self.style()),
            Event::Code(code) => {
                let style = SpanStyle {
                    code: true,
                    ..self.style()
                };
                self.push_text(&code, style);
            }
            Event::SoftBreak => self.push_text(" ", self.style()),
            Event::HardBreak => self.push_text("\n", self.style()),
            Event::Rule => {
                self.flush();
                self.blocks.push(Block {
                    kind: BlockKind::Rule,
                    spans: Vec::new(),
                });
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_text(marker, self.style());
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.push_text(&math, self.style());
            }
            Event::Html(_) | Event::InlineHtml(_) | Event::FootnoteReference(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.kind = Some(BlockKind::Heading(level as u8));
            }
            Tag::Paragraph => {
                // A loose list item wraps its text in a paragraph; keep the item.
                let item_pending = matches!(self.kind, Some(BlockKind::ListItem { .. }))
                    && self.spans.is_empty();
                if !item_pending {
                    self.flush();
                    self.kind = Some(BlockKind::Paragraph);
                }
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.in_code_block = true;
                self.kind = Some(BlockKind::CodeBlock);
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let current = *next;
                        *next += 1;
                        Some(current)
                    }
                    _ => None,
                };
                self.kind = Some(BlockKind::ListItem { depth, marker });
            }
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) | TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::CodeBlock => {
                self.flush();
                self.in_code_block = false;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str, style: SpanStyle) {
        if self.kind.is_none() {
            self.kind = Some(BlockKind::Paragraph);
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                style,
            }),
        }
    }

    fn flush(&mut self) {
        let kind = self.kind.take();
        let mut spans = std::mem::take(&mut self.spans);
        let Some(kind) = kind else {
            return;
        };
        if kind == BlockKind::CodeBlock {
            if let Some(last) = spans.last_mut() {
                let trimmed = last.text.trim_end_matches('\n').len();
                last.text.truncate(trimmed);
            }
        }
        if spans.iter().all(|span| span.text.trim().is_empty()) {
            return;
        }
        self.blocks.push(Block { kind, spans });
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

const BODY_SIZE: f32 = 14.0;
const LIST_INDENT: f32 = 16.0;

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 22.0,
        2 => 19.0,
        3 => 17.0,
        _ => 15.0,
    }
}

pub fn show(ui: &mut egui::Ui, text: &str) {
    let blocks = parse_blocks(text);
    for block in &blocks {
        match block.kind {
            BlockKind::Rule => {
                ui.separator();
            }
            BlockKind::CodeBlock => {
                egui::Frame::NONE
                    .fill(ui.visuals().code_bg_color)
                    .inner_margin(egui::Margin::same(6))
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.label(layout_block(ui, block));
                    });
            }
            _ => {
                ui.label(layout_block(ui, block));
            }
        }
    }
}

fn layout_block(ui: &egui::Ui, block: &Block) -> LayoutJob {
    let visuals = ui.visuals();
    let text_color = visuals.text_color();
    let strong_color = visuals.strong_text_color();
    let code_bg = visuals.code_bg_color;

    let (size, heading) = match block.kind {
        BlockKind::Heading(level) => (heading_size(level), true),
        _ => (BODY_SIZE, false),
    };

    let mut job = LayoutJob::default();
    job.wrap.max_width = ui.available_width();

    if let BlockKind::ListItem { depth, marker } = block.kind {
        let bullet = match marker {
            Some(number) => format!("{number}. "),
            None => "• ".to_string(),
        };
        job.append(
            &bullet,
            LIST_INDENT * depth as f32,
            TextFormat {
                font_id: FontId::proportional(size),
                color: strong_color,
                ..Default::default()
            },
        );
    }

    for span in &block.spans {
        let font_id = if span.style.code {
            FontId::monospace(size - 1.0)
        } else {
            FontId::proportional(size)
        };
        let color = if span.style.bold || heading {
            strong_color
        } else {
            text_color
        };
        job.append(
            &span.text,
            0.0,
            TextFormat {
                font_id,
                color,
                italics: span.style.italic,
                background: if span.style.code && block.kind != BlockKind::CodeBlock {
                    code_bg
                } else {
                    Color32::TRANSPARENT
                },
                ..Default::default()
            },
        );
    }
    job
}

#[cfg(test)]
#[path = "../tests/markdown_tests.rs"]
mod tests;

use super::*;

fn kinds(blocks: &[Block]) -> Vec<BlockKind> {
    blocks.iter().map(|block| block.kind).collect()
}

#[test]
fn blank_text_has_no_blocks() {
    assert!(parse_blocks("").is_empty());
    assert!(parse_blocks("   \n\n").is_empty());
}

#[test]
fn heading_and_paragraph_become_separate_blocks() {
    let blocks = parse_blocks("# Acme Rocket\n\nReusable boosters for everyone.");
    assert_eq!(kinds(&blocks), vec![BlockKind::Heading(1), BlockKind::Paragraph]);
    assert_eq!(blocks[0].plain_text(), "Acme Rocket");
    assert_eq!(blocks[1].plain_text(), "Reusable boosters for everyone.");
}

#[test]
fn inline_styles_are_tracked_per_span() {
    let blocks = parse_blocks("Cut costs by **90%** with *reusable* `stage-1` boosters");
    let spans = &blocks[0].spans;
    let bold = spans.iter().find(|span| span.text == "90%").expect("bold span");
    assert!(bold.style.bold);
    let italic = spans.iter().find(|span| span.text == "reusable").expect("italic span");
    assert!(italic.style.italic);
    let code = spans.iter().find(|span| span.text == "stage-1").expect("code span");
    assert!(code.style.code);
    assert_eq!(
        blocks[0].plain_text(),
        "Cut costs by 90% with reusable stage-1 boosters"
    );
}

#[test]
fn bullet_and_numbered_lists_carry_markers() {
    let blocks = parse_blocks("- Seed: $2M\n- Series A: $10M\n\n3. Hire\n4. Launch\n");
    assert_eq!(
        kinds(&blocks),
        vec![
            BlockKind::ListItem { depth: 0, marker: None },
            BlockKind::ListItem { depth: 0, marker: None },
            BlockKind::ListItem { depth: 0, marker: Some(3) },
            BlockKind::ListItem { depth: 0, marker: Some(4) },
        ]
    );
    assert_eq!(blocks[1].plain_text(), "Series A: $10M");
    assert_eq!(blocks[3].plain_text(), "Launch");
}

#[test]
fn nested_list_items_are_indented() {
    let blocks = parse_blocks("- Market\n  - TAM $40B\n- Team\n");
    assert_eq!(
        kinds(&blocks),
        vec![
            BlockKind::ListItem { depth: 0, marker: None },
            BlockKind::ListItem { depth: 1, marker: None },
            BlockKind::ListItem { depth: 0, marker: None },
        ]
    );
    assert_eq!(blocks[1].plain_text(), "TAM $40B");
}

#[test]
fn loose_list_items_keep_their_marker() {
    let blocks = parse_blocks("1. First\n\n2. Second\n");
    assert_eq!(
        kinds(&blocks),
        vec![
            BlockKind::ListItem { depth: 0, marker: Some(1) },
            BlockKind::ListItem { depth: 0, marker: Some(2) },
        ]
    );
}

#[test]
fn code_block_and_rule_are_kept_and_html_dropped() {
    let blocks = parse_blocks("```\nlet x = 1;\n```\n\n---\n\n<div>raw</div>\n\nAfter");
    assert_eq!(
        kinds(&blocks),
        vec![BlockKind::CodeBlock, BlockKind::Rule, BlockKind::Paragraph]
    );
    assert_eq!(blocks[0].plain_text(), "let x = 1;");
    assert!(blocks[0].spans[0].style.code);
    assert_eq!(blocks[2].plain_text(), "After");
}

#[test]
fn soft_breaks_join_lines_with_spaces() {
    let blocks = parse_blocks("Line one\nline two");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].plain_text(), "Line one line two");
}

//! Shared icon mapping for tree visualization

/// Get the Unicode icon for a given IR node type
///
/// Returns a single Unicode character that visually represents the node type.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Heading" => "§",
        "Paragraph" => "¶",
        "List" => "☰",
        "ListItem" => "•",
        "Table" => "▦",
        "TableHeader" => "⊤",
        "TableRow" => "≡",
        "Verbatim" => "𝒱",
        "Placeholder" => "▣",
        "Break" => "⎯",
        "Text" => "◦",
        "Bold" => "𝐁",
        "Italic" => "𝐼",
        "Code" => "ƒ",
        "Link" => "⊕",
        _ => "○",
    }
}

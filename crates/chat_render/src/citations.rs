/// Lay out citation labels under a `Sources (n)` heading, numbered from 1.
///
/// Returns `None` when there is nothing to cite.
pub fn format_citations(sources: &[String]) -> Option<String> {
    if sources.is_empty() {
        return None;
    }
    let mut out = format!("Sources ({})", sources.len());
    for (i, name) in sources.iter().enumerate() {
        out.push_str(&format!("\n  {} {}", i + 1, name));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sources_renders_nothing() {
        assert_eq!(format_citations(&[]), None);
    }

    #[test]
    fn test_sources_are_one_indexed() {
        let sources = vec!["lease.pdf".to_string(), "statute.txt".to_string()];
        assert_eq!(
            format_citations(&sources).unwrap(),
            "Sources (2)\n  1 lease.pdf\n  2 statute.txt"
        );
    }
}

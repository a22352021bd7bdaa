use crate::error::ConflictError;
use crate::types::{ConflictRegion, Pick};

/// Opening marker. Only the literal `HEAD` form is recognised.
pub const START_MARKER: &str = "<<<<<<< HEAD";
pub const MIDDLE_MARKER: &str = "=======";
/// Closing marker prefix; the ref name after the space is ignored.
pub const END_MARKER_PREFIX: &str = ">>>>>>> ";

/// Scan file content for conflict regions.
///
/// Lines are split after each `\n`, so a trailing line terminator does not
/// produce an extra empty line, and markers are compared without their
/// `\n` or `\r\n`. Regions come back in ascending `start` order.
///
/// Incomplete blocks are dropped rather than reported: a start marker with
/// no separator or end before the next start marker (or end of file) yields
/// nothing, and stray separator/end markers outside a block are ignored.
pub fn scan(content: &str) -> Vec<ConflictRegion> {
    let mut regions = Vec::new();
    // (start, middle) of the block currently being read
    let mut pending: Option<(usize, Option<usize>)> = None;

    for (i, line) in split_lines(content).map(strip_eol).enumerate() {
        if line == START_MARKER {
            if let Some((start, _)) = pending {
                log::debug!("Dropping unterminated conflict opened at line {}", start);
            }
            pending = Some((i, None));
        } else if line == MIDDLE_MARKER {
            if let Some((_, middle)) = pending.as_mut() {
                *middle = Some(i);
            }
        } else if line.starts_with(END_MARKER_PREFIX) {
            match pending.take() {
                Some((start, Some(middle))) => {
                    regions.push(ConflictRegion::new(start, middle, i));
                }
                Some((start, None)) => {
                    log::debug!(
                        "Dropping conflict opened at line {} with no separator before line {}",
                        start,
                        i
                    );
                }
                None => {}
            }
        }
    }

    if let Some((start, _)) = pending {
        log::debug!("Dropping unterminated conflict opened at line {}", start);
    }

    regions
}

/// Resolve one region of `content`, keeping the lines selected by `pick`.
///
/// All three marker lines of the region are always removed. `Pick::Top`
/// also removes the bottom body, `Pick::Bottom` the top body, and
/// `Pick::Both` keeps both bodies. Lines outside the region are untouched.
///
/// Every kept line is copied byte for byte, terminator included, so files
/// with CRLF or mixed line endings keep them. The result ends with a line
/// terminator iff `content` did. The region must come from a scan of this
/// exact content; a region that cannot belong to it is rejected.
pub fn resolve(content: &str, region: &ConflictRegion, pick: Pick) -> Result<String, ConflictError> {
    if !(region.start < region.middle && region.middle < region.end) {
        return Err(ConflictError::InvalidRegion {
            start: region.start,
            middle: region.middle,
            end: region.end,
        });
    }

    let lines: Vec<&str> = split_lines(content).collect();
    if region.end >= lines.len() {
        return Err(ConflictError::RegionOutOfBounds {
            end: region.end,
            line_count: lines.len(),
        });
    }

    let mut output: String = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| !should_delete(*i, region, pick))
        .map(|(_, line)| *line)
        .collect();

    // Dropping an unterminated last line must not leave a dangling terminator
    if !content.ends_with('\n') {
        let trimmed = strip_eol(&output).len();
        output.truncate(trimmed);
    }

    Ok(output)
}

fn should_delete(i: usize, region: &ConflictRegion, pick: Pick) -> bool {
    if region.is_marker(i) {
        return true;
    }
    match pick {
        Pick::Top => i > region.middle && i < region.end,
        Pick::Bottom => i > region.start && i < region.middle,
        Pick::Both => false,
    }
}

/// Split `content` after each `\n`, keeping the terminators.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split_inclusive('\n')
}

fn strip_eol(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str =
        "line1\n<<<<<<< HEAD\nmine\n=======\ntheirs\n>>>>>>> feature\nline2";

    fn two_conflicts() -> String {
        [
            "header",
            "<<<<<<< HEAD",
            "a1",
            "a2",
            "=======",
            "b1",
            ">>>>>>> topic",
            "between",
            "<<<<<<< HEAD",
            "c1",
            "=======",
            "d1",
            "d2",
            ">>>>>>> topic",
            "footer",
        ]
        .join("\n")
            + "\n"
    }

    #[test]
    fn test_scan_fixture() {
        assert_eq!(scan(FIXTURE), vec![ConflictRegion::new(1, 3, 5)]);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let content = two_conflicts();
        assert_eq!(scan(&content), scan(&content));
    }

    #[test]
    fn test_scan_two_regions_in_order() {
        let regions = scan(&two_conflicts());
        assert_eq!(
            regions,
            vec![ConflictRegion::new(1, 4, 6), ConflictRegion::new(8, 10, 13)]
        );
    }

    #[test]
    fn test_scan_no_conflicts() {
        assert!(scan("fn main() {}\n").is_empty());
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_scan_requires_literal_head() {
        let content = "<<<<<<< ours\na\n=======\nb\n>>>>>>> theirs\n";
        assert!(scan(content).is_empty());
    }

    #[test]
    fn test_scan_end_marker_needs_space() {
        let content = "<<<<<<< HEAD\na\n=======\nb\n>>>>>>>\n";
        assert!(scan(content).is_empty());
    }

    #[test]
    fn test_scan_drops_unterminated_region() {
        let content = "x\n<<<<<<< HEAD\na\n=======\nb\n";
        assert!(scan(content).is_empty());
    }

    #[test]
    fn test_scan_drops_region_without_separator() {
        let content = "<<<<<<< HEAD\na\n>>>>>>> topic\n";
        assert!(scan(content).is_empty());
    }

    #[test]
    fn test_scan_ignores_stray_markers() {
        let content = "Title\n=======\n>>>>>>> quote\n<<<<<<< HEAD\na\n=======\nb\n>>>>>>> x\n";
        assert_eq!(scan(content), vec![ConflictRegion::new(3, 5, 7)]);
    }

    #[test]
    fn test_scan_restart_on_second_start() {
        let content = "<<<<<<< HEAD\na\n<<<<<<< HEAD\nb\n=======\nc\n>>>>>>> x\n";
        assert_eq!(scan(content), vec![ConflictRegion::new(2, 4, 6)]);
    }

    #[test]
    fn test_scan_crlf() {
        let content = "l\r\n<<<<<<< HEAD\r\na\r\n=======\r\nb\r\n>>>>>>> x\r\n";
        assert_eq!(scan(content), vec![ConflictRegion::new(1, 3, 5)]);
    }

    #[test]
    fn test_resolve_keep_top() {
        let region = ConflictRegion::new(1, 3, 5);
        assert_eq!(resolve(FIXTURE, &region, Pick::Top).unwrap(), "line1\nmine\nline2");
    }

    #[test]
    fn test_resolve_keep_bottom() {
        let region = ConflictRegion::new(1, 3, 5);
        assert_eq!(
            resolve(FIXTURE, &region, Pick::Bottom).unwrap(),
            "line1\ntheirs\nline2"
        );
    }

    #[test]
    fn test_resolve_keep_both() {
        let region = ConflictRegion::new(1, 3, 5);
        assert_eq!(
            resolve(FIXTURE, &region, Pick::Both).unwrap(),
            "line1\nmine\ntheirs\nline2"
        );
    }

    #[test]
    fn test_resolve_preserves_trailing_newline() {
        let content = format!("{}\n", FIXTURE);
        let region = ConflictRegion::new(1, 3, 5);
        assert_eq!(
            resolve(&content, &region, Pick::Top).unwrap(),
            "line1\nmine\nline2\n"
        );
    }

    #[test]
    fn test_resolve_preserves_crlf() {
        let content = "l\r\n<<<<<<< HEAD\r\na\r\n=======\r\nb\r\n>>>>>>> x\r\nr\r\n";
        let region = ConflictRegion::new(1, 3, 5);
        assert_eq!(resolve(content, &region, Pick::Bottom).unwrap(), "l\r\nb\r\nr\r\n");
    }

    #[test]
    fn test_resolve_whole_file_to_empty() {
        let content = "<<<<<<< HEAD\n=======\nb\n>>>>>>> x\n";
        let region = ConflictRegion::new(0, 1, 3);
        assert_eq!(resolve(content, &region, Pick::Top).unwrap(), "");
    }

    #[test]
    fn test_resolve_first_region_leaves_second_intact() {
        let content = two_conflicts();
        let regions = scan(&content);
        let resolved = resolve(&content, &regions[0], Pick::Bottom).unwrap();

        assert_eq!(
            resolved,
            "header\nb1\nbetween\n<<<<<<< HEAD\nc1\n=======\nd1\nd2\n>>>>>>> topic\nfooter\n"
        );
        // Second region has shifted; a re-scan is needed before resolving it
        let rescanned = scan(&resolved);
        assert_eq!(rescanned, vec![ConflictRegion::new(3, 5, 8)]);

        let done = resolve(&resolved, &rescanned[0], Pick::Top).unwrap();
        assert_eq!(done, "header\nb1\nbetween\nc1\nfooter\n");
        assert!(scan(&done).is_empty());
    }

    #[test]
    fn test_resolve_rejects_out_of_bounds() {
        let region = ConflictRegion::new(1, 3, 9);
        assert_eq!(
            resolve(FIXTURE, &region, Pick::Top),
            Err(ConflictError::RegionOutOfBounds {
                end: 9,
                line_count: 7
            })
        );
    }

    #[test]
    fn test_resolve_rejects_unordered_region() {
        let region = ConflictRegion::new(3, 1, 5);
        assert!(matches!(
            resolve(FIXTURE, &region, Pick::Top),
            Err(ConflictError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_resolve_keeps_mixed_line_endings() {
        let content = "a\nwin\r\n<<<<<<< HEAD\nx\r\n=======\ny\n>>>>>>> t\nb\r\n";
        let region = ConflictRegion::new(2, 4, 6);
        assert_eq!(scan(content), vec![region]);
        assert_eq!(
            resolve(content, &region, Pick::Top).unwrap(),
            "a\nwin\r\nx\r\nb\r\n"
        );
        assert_eq!(
            resolve(content, &region, Pick::Both).unwrap(),
            "a\nwin\r\nx\r\ny\nb\r\n"
        );
    }

    #[test]
    fn test_scan_mixed_marker_endings() {
        let content = "<<<<<<< HEAD\r\na\n=======\r\nb\n>>>>>>> x\r\n";
        assert_eq!(scan(content), vec![ConflictRegion::new(0, 2, 4)]);
    }

    #[test]
    fn test_resolve_unterminated_end_marker() {
        let content = "a\r\n<<<<<<< HEAD\r\nx\r\n=======\r\ny\r\n>>>>>>> t";
        let region = ConflictRegion::new(1, 3, 5);
        assert_eq!(resolve(content, &region, Pick::Top).unwrap(), "a\r\nx");
        assert_eq!(resolve(content, &region, Pick::Bottom).unwrap(), "a\r\ny");
    }
}

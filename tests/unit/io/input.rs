//! Tests for puzzle text parsing and file reading

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;
    use tilefit::SolverError;
    use tilefit::io::configuration::MAX_AREA_CELLS;
    use tilefit::io::input::{parse_puzzle, read_puzzle};
    use tilefit::spatial::region::Region;
    use tilefit::spatial::shape::Shape;

    const SAMPLE: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2
";

    fn expect_invalid_line(text: &str) -> usize {
        match parse_puzzle(text) {
            Err(SolverError::InvalidInput { line, .. }) => line,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    // Tests the sample parses into six shapes and three areas
    // Verified by reading area dimensions as rows x cols
    #[test]
    fn test_parse_sample() {
        let puzzle = parse_puzzle(SAMPLE).expect("sample parses");

        assert_eq!(puzzle.shapes.len(), 6);
        assert_eq!(
            puzzle.shapes.first(),
            Some(&Shape::from_rows(&["###", "##.", "##."]).expect("valid shape rows"))
        );
        assert_eq!(
            puzzle.shapes.get(4),
            Some(&Shape::from_rows(&["###", "#..", "###"]).expect("valid shape rows"))
        );

        assert_eq!(puzzle.areas.len(), 3);
        let first = puzzle.areas.first().expect("first area");
        assert_eq!(first.region, Region::new(4, 4));
        assert_eq!(first.counts, vec![0, 0, 0, 0, 2, 0]);
        assert_eq!(first.line, 31);

        let second = puzzle.areas.get(1).expect("second area");
        assert_eq!(second.region, Region::new(5, 12));
        assert_eq!(second.counts, vec![1, 0, 1, 0, 2, 2]);
    }

    // Tests catalog and task construction from a parsed puzzle
    // Verified by numbering tasks from one
    #[test]
    fn test_catalog_and_tasks() {
        let puzzle = parse_puzzle(SAMPLE).expect("sample parses");

        let catalog = puzzle.catalog();
        assert_eq!(catalog.len(), 6);

        let tasks = puzzle.tasks();
        let indices: Vec<usize> = tasks.iter().map(|task| task.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(tasks.get(1).map(|task| task.region), Some(Region::new(5, 12)));
    }

    // Tests short count lists and surrounding whitespace
    // Verified by requiring one count per tile type
    #[test]
    fn test_lenient_formatting() {
        let puzzle = parse_puzzle("  0:\n ## \n\n\n3x2:   1\n").expect("puzzle parses");
        assert_eq!(puzzle.shapes.len(), 1);
        let area = puzzle.areas.first().expect("one area");
        assert_eq!(area.region, Region::new(2, 3));
        assert_eq!(area.counts, vec![1]);
    }

    // Tests out-of-order tile type headers
    // Verified by accepting any header index
    #[test]
    fn test_out_of_order_header() {
        assert_eq!(expect_invalid_line("0:\n#\n\n2:\n#\n"), 4);
    }

    // Tests bad shape characters report the file line
    // Verified by reporting the row within the shape
    #[test]
    fn test_bad_shape_character() {
        assert_eq!(expect_invalid_line("0:\n##\n#?\n"), 3);
    }

    // Tests shapes without occupied cells are rejected
    // Verified by allowing empty shapes
    #[test]
    fn test_empty_shape() {
        assert_eq!(expect_invalid_line("0:\n...\n\n1x1: 1\n"), 1);
    }

    // Tests malformed area lines
    // Verified by defaulting unparsable counts to zero
    #[test]
    fn test_malformed_area_lines() {
        assert_eq!(expect_invalid_line("0:\n#\n\n4by4: 1\n"), 4);
        assert_eq!(expect_invalid_line("0:\n#\n\n4x4: one\n"), 4);
        assert_eq!(expect_invalid_line("0:\n#\n\n4x: 1\n"), 4);
        assert_eq!(expect_invalid_line("0:\n#\nhello\n"), 3);
    }

    // Tests non-zero counts for undefined tile types
    // Verified by ignoring extra counts
    #[test]
    fn test_count_for_undefined_type() {
        assert_eq!(expect_invalid_line("0:\n#\n\n2x2: 1 0\n3x3: 0 1\n"), 5);
        assert!(parse_puzzle("0:\n#\n\n2x2: 1 0 0\n").is_ok());
    }

    // Tests reading from disk and the error for a missing file
    // Verified by returning an empty puzzle for missing files
    #[test]
    fn test_read_puzzle() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("puzzle.txt");
        fs::write(&path, SAMPLE).expect("Failed to write puzzle");

        let puzzle = read_puzzle(&path).expect("file parses");
        assert_eq!(puzzle.areas.len(), 3);

        let missing = read_puzzle(&temp_dir.path().join("missing.txt"));
        assert!(matches!(
            missing,
            Err(SolverError::FileSystem {
                operation: "read puzzle",
                ..
            })
        ));
    }

    // Tests areas beyond the cell limit are rejected on their own line
    // Verified by multiplying the dimensions unchecked
    #[test]
    fn test_area_cell_limit() {
        assert_eq!(expect_invalid_line("0:\n#\n\n4294967296x4294967296: 1\n"), 4);
        assert_eq!(
            expect_invalid_line(&format!("0:\n#\n\n2x2: 1\n{}x1: 1\n", MAX_AREA_CELLS + 1)),
            5
        );
        assert_eq!(expect_invalid_line("0:\n#\n\n100000x100000: 1\n"), 4);

        let puzzle = parse_puzzle("0:\n#\n\n1024x1024: 1\n").expect("area at the limit parses");
        let area = puzzle.areas.first().expect("one area");
        assert_eq!(area.region.area(), MAX_AREA_CELLS);
    }
}

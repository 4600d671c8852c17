mod common;

use common::{parse_standard_case, rotations};
use patrol_sim::{analyze, Grid};
use std::fs;
use std::path::Path;

#[test]
fn standard_format_tests() {
    let test_dir = "./test_data/standard";
    let mut passed = 0;

    let mut entries: Vec<_> = fs::read_dir(test_dir)
        .expect("test_data/standard should exist")
        .filter_map(Result::ok)
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();

        // Skip markdown files and directories
        if path.extension().and_then(|s| s.to_str()) == Some("md") || path.is_dir() {
            continue;
        }

        let test_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");

        let case = match parse_standard_case(&path) {
            Ok(case) => case,
            Err(e) => panic!("Test '{}' failed to parse: {}", test_name, e),
        };

        for (variant_name, layout) in rotations(&case.layout) {
            let grid = Grid::parse(&layout)
                .unwrap_or_else(|e| panic!("Test '{}' [{}] invalid layout: {}", test_name, variant_name, e));
            let analysis = analyze(&grid)
                .unwrap_or_else(|e| panic!("Test '{}' [{}] analysis failed: {}", test_name, variant_name, e));

            assert_eq!(
                analysis.visited_cells(),
                Some(case.visited),
                "Test '{}' [{}] visited cells",
                test_name,
                variant_name
            );
            assert_eq!(
                analysis.loop_obstructions(),
                case.loops,
                "Test '{}' [{}] loop obstructions",
                test_name,
                variant_name
            );
            assert_eq!(analysis.search.budget_exceeded, 0);
        }

        passed += 1;
    }

    assert!(passed >= 4, "expected at least 4 standard cases, ran {}", passed);
    println!("All {} standard format tests passed", passed);
}

#[test]
fn reference_layout_loop_cells() {
    let case = parse_standard_case(Path::new("./test_data/standard/reference_10x10.txt")).unwrap();
    let grid = Grid::parse(&case.layout).unwrap();
    let report = patrol_sim::search_obstructions(&grid).unwrap();

    let cells: Vec<(i32, i32)> = report.loop_cells.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(cells, vec![(3, 6), (6, 7), (7, 7), (1, 8), (3, 8), (7, 9)]);
}

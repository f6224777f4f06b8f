use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mathplan_catalog::{CourseCatalog, MajorRequirementRegistry};
use mathplan_engine::{Advice, EligibilityResult, Node, SelfAssessmentTree, Step};
use mathplan_model::{AdvisoryCategory, Major, Standing};

use crate::commands::PolicyCheck;

pub fn print_advice(catalog: &CourseCatalog, advice: &Advice) {
    println!("{}", eligibility_table(catalog, &advice.eligibility));
    for line in advice_lines(advice) {
        println!("{line}");
    }
}

/// One row per catalog course, in catalog order.
pub fn eligibility_table(catalog: &CourseCatalog, result: &EligibilityResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Course"),
        header_cell("Title"),
        header_cell("Standing"),
        header_cell("Because"),
    ]);
    apply_table_style(&mut table);
    for course in catalog.iter() {
        let standing = result.standing(&course.id);
        let because = result
            .status(&course.id)
            .map(|status| {
                status
                    .sources
                    .iter()
                    .map(|source| source.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&course.id),
            Cell::new(&course.title),
            standing_cell(standing),
            dim_cell(because),
        ]);
    }
    table
}

pub fn advice_lines(advice: &Advice) -> Vec<String> {
    let recommendation = &advice.recommendation;
    let mut lines = Vec::new();
    let requirements = recommendation
        .requirements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    lines.push(format!("Requirements: {}", or_none(&requirements)));
    let missing = recommendation
        .missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    lines.push(format!("Missing: {}", or_none(&missing)));
    lines.push(format!(
        "Next step: {} ({})",
        recommendation.code, recommendation.category
    ));
    lines.push(recommendation.code.advice());
    for tally in &recommendation.credits {
        if tally.is_satisfied() {
            lines.push(format!("{}: already satisfied by credit", tally.group));
        } else if tally.completed > 0 {
            lines.push(format!(
                "{}: completed {} of {} credits",
                tally.group, tally.completed, tally.required
            ));
        }
    }
    let ignored = advice.eligibility.ignored_transfers();
    if !ignored.is_empty() {
        lines.push(format!("Ignored transfer codes: {}", ignored.join(", ")));
    }
    lines
}

pub fn majors_table(registry: &MajorRequirementRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Major"),
        header_cell("Semester 1"),
        header_cell("Semester 2"),
        header_cell("Semester 3+"),
        header_cell("Questions"),
    ]);
    apply_table_style(&mut table);
    for major in registry.iter() {
        let code = if major.selectable {
            Cell::new(&major.code)
        } else {
            dim_cell(&major.code)
        };
        table.add_row(vec![
            code,
            Cell::new(major.display_name()),
            Cell::new(semester_column(major, 1..=1)),
            Cell::new(semester_column(major, 2..=2)),
            Cell::new(semester_column(major, 3..=u8::MAX)),
            dim_cell(
                major
                    .questions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        ]);
    }
    table
}

fn semester_column(major: &Major, semesters: std::ops::RangeInclusive<u8>) -> String {
    major
        .requirements
        .iter()
        .filter(|req| semesters.contains(&req.semester))
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn paths_table(tree: &SelfAssessmentTree) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Answers"),
        header_cell("Category"),
        header_cell("Advice"),
    ]);
    apply_table_style(&mut table);
    for (path, terminal) in tree.paths() {
        table.add_row(vec![
            Cell::new(path),
            category_cell(terminal.category),
            Cell::new(terminal.advice),
        ]);
    }
    table
}

pub fn step_lines(step: &Step<'_>) -> Vec<String> {
    match step.node {
        Node::Question(question) => {
            let choices = question
                .answers()
                .map(|answer| answer.to_string())
                .collect::<Vec<_>>()
                .join(" / ");
            vec![
                format!("Question {}: {}", question.number, question.prompt),
                format!("Answers: {choices}"),
            ]
        }
        Node::Terminal(terminal) => vec![
            format!("Recommendation: {}", terminal.category),
            terminal.advice.to_string(),
        ],
    }
}

pub fn check_lines(check: &PolicyCheck) -> Vec<String> {
    vec![
        format!("Policy: {}", check.origin),
        format!(
            "Courses: {} ({} placement gates)",
            check.courses, check.gates
        ),
        format!("Equivalencies: {}", check.equivalencies),
        format!(
            "Majors: {} ({} selectable)",
            check.majors, check.selectable
        ),
        format!("Decision table rows: {}", check.table_rows),
        format!(
            "Questionnaire: {} nodes, {} recommendations",
            check.tree_nodes, check.tree_paths
        ),
    ]
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Left);
    }
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn standing_cell(standing: Standing) -> Cell {
    let color = match standing {
        Standing::CreditEarned => Color::Green,
        Standing::Cleared => Color::Cyan,
        Standing::Eligible => Color::Yellow,
        Standing::Ineligible => Color::DarkGrey,
    };
    Cell::new(standing).fg(color)
}

fn category_cell(category: AdvisoryCategory) -> Cell {
    let color = match category {
        AdvisoryCategory::NoActionNeeded => Color::Green,
        AdvisoryCategory::StronglyRecommendPlace => Color::Red,
        _ => Color::Yellow,
    };
    Cell::new(category).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    std::fs::create_dir_all("gradebooks")?;
    let example_path = std::path::Path::new("gradebooks/example.toml");
    if example_path.exists() {
        println!("gradebooks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_GRADEBOOK)?;
        println!("Created gradebooks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradebooks/example.toml with your roster and scores");
    println!("  2. Run: gradebook validate --gradebook gradebooks/example.toml");
    println!("  3. Run: gradebook rank --gradebook gradebooks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

# Output format when --format is not given: "text" or "json".
# GRADEBOOK_FORMAT overrides this.
default_format = "text"

[detector]
z_threshold = 2.0
min_sample = 3
perfect_score_min_sample = 5
low_average_pct = 75.0
"#;

const EXAMPLE_GRADEBOOK: &str = r#"[course]
code = "EX100"
name = "Example Course"
semester = "Fall"

[[students]]
id = "S001"
name = "Ada Lovelace"
email = "ada@example.edu"

[[students]]
id = "S002"
name = "Alan Turing"

[[students]]
id = "S003"
name = "Grace Hopper"

[[assignments]]
title = "Homework"
weight = 0.4
max_score = 50.0

[[assignments]]
title = "Exam"
weight = 0.6

[[scores]]
student_id = "S001"
assignment = "Homework"
score = 46.0

[[scores]]
student_id = "S001"
assignment = "Exam"
score = 91.0

[[scores]]
student_id = "S002"
assignment = "Homework"
score = 38.0

[[scores]]
student_id = "S002"
assignment = "Exam"
score = 74.0

[[scores]]
student_id = "S003"
assignment = "Homework"
score = 41.0
"#;

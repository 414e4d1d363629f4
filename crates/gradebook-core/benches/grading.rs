use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradebook_core::aggregator::{compute_final, rank_course};
use gradebook_core::detector::{detect_course, DetectorConfig};
use gradebook_core::model::{Assignment, Course, ScoreRecord, Student};
use gradebook_core::snapshot::Gradebook;
use gradebook_core::traits::ScoreProvider;

/// A course with `students` students and `assignments` equally weighted
/// assignments, with every tenth score left out.
fn make_gradebook(students: usize, assignments: usize) -> Gradebook {
    let roster: Vec<Student> = (0..students)
        .map(|i| Student {
            id: format!("S{i:05}"),
            name: format!("Student {i}"),
            email: String::new(),
        })
        .collect();
    let defs: Vec<Assignment> = (0..assignments)
        .map(|j| Assignment {
            title: format!("Assignment {j}"),
            weight: 1.0 / assignments as f64,
            max_score: 100.0,
        })
        .collect();
    let records: Vec<ScoreRecord> = (0..students)
        .flat_map(|i| (0..assignments).map(move |j| (i, j)))
        .filter(|(i, j)| (i + j) % 10 != 0)
        .map(|(i, j)| ScoreRecord {
            student_id: format!("S{i:05}"),
            assignment: format!("Assignment {j}"),
            score: ((i * 37 + j * 11) % 101) as f64,
        })
        .collect();

    Gradebook::new(
        Course {
            code: "BENCH".into(),
            name: "Bench".into(),
            semester: String::new(),
        },
        roster,
        defs,
        records,
    )
    .expect("bench gradebook is well formed")
}

fn bench_compute_final(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_final");

    for assignments in [5, 20] {
        let book = make_gradebook(1, assignments);
        let scores = book.student_scores("S00000");
        group.bench_function(format!("assignments={assignments}"), |b| {
            b.iter(|| compute_final(black_box("S00000"), black_box(&scores), &book))
        });
    }

    group.finish();
}

fn bench_rank_and_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("course");
    let config = DetectorConfig::default();

    for (students, assignments) in [(30, 8), (300, 12)] {
        let book = make_gradebook(students, assignments);
        group.bench_function(format!("rank/{students}x{assignments}"), |b| {
            b.iter(|| rank_course(black_box(&book)))
        });
        group.bench_function(format!("detect/{students}x{assignments}"), |b| {
            b.iter(|| detect_course(black_box(&book), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_final, bench_rank_and_detect);
criterion_main!(benches);

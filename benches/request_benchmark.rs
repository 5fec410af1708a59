use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use project_gallery::{
    project::{NewProject, ProjectChanges, ProjectStatus},
    request::{Action, Framing},
    response::{into_projects, normalize, RawResponse},
};

fn new_project() -> NewProject {
    NewProject {
        title: "Autonomous Rover".to_string(),
        team: "Ana, Bo, Cy".to_string(),
        description: "A small rover that maps the campus courtyard".to_string(),
        email: "ana@example.com".to_string(),
        status: ProjectStatus::InProgress,
        link: Some("https://example.com/rover".to_string()),
    }
}

fn sample_actions() -> Vec<(&'static str, Action)> {
    vec![
        ("list_visible", Action::ListVisible),
        (
            "list_all",
            Action::ListAll {
                password: "s3cret".to_string(),
            },
        ),
        ("create", Action::Create(new_project())),
        (
            "update",
            Action::Update {
                id: "p-1".to_string(),
                changes: ProjectChanges {
                    title: "Autonomous Rover".to_string(),
                    team: "Ana, Bo".to_string(),
                    description: "A small rover that maps the campus courtyard".to_string(),
                    email: "ana@example.com".to_string(),
                    status: ProjectStatus::Completed,
                    link: None,
                    github: Some("https://github.com/ana/rover".to_string()),
                    demo: None,
                    visible: None,
                },
            },
        ),
        (
            "toggle",
            Action::ToggleVisibility {
                id: "p-1".to_string(),
                visible: false,
                admin_notes: String::new(),
                password: "s3cret".to_string(),
            },
        ),
    ]
}

fn framing_benchmark(c: &mut Criterion) {
    for framing in [Framing::Script, Framing::Rest] {
        let mut group = c.benchmark_group(format!("frame_{:?}", framing).to_lowercase());
        for (name, action) in sample_actions() {
            group.bench_with_input(BenchmarkId::from_parameter(name), &action, |b, action| {
                b.iter(|| framing.frame(black_box(action)));
            });
        }
        group.finish();
    }
}

fn project_list(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id":{},"title":"Project {}","description":"Description of project {}","team":"Ana, Bo","email":"team{}@example.com","status":"In Progress","visible":"TRUE"}}"#,
                i, i, i, i
            )
        })
        .collect();
    format!(r#"{{"success":true,"data":[{}]}}"#, items.join(","))
}

fn normalize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_projects");

    for count in [10, 100, 1000].iter() {
        let raw = RawResponse::new(200, project_list(*count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &raw, |b, raw| {
            b.iter(|| {
                let value = normalize(black_box(raw), 0).unwrap();
                into_projects(value).unwrap()
            });
        });
    }

    group.finish();
}

fn normalize_plain_text_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_plain_text");

    let bodies = [
        ("ok_text", RawResponse::new(200, "Done")),
        ("error_html", RawResponse::new(500, "<html>Internal Error</html>")),
        ("rejected", RawResponse::new(200, r#"{"error":"Project not found"}"#)),
    ];

    for (name, raw) in bodies.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), raw, |b, raw| {
            b.iter(|| {
                let _ = normalize(black_box(raw), 0);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    framing_benchmark,
    normalize_benchmark,
    normalize_plain_text_benchmark
);
criterion_main!(benches);

use crate::algo::RunStats;
use crate::model::Assignments;
use crate::stats;

pub fn display_details(a: &Assignments) {
    let mut projects = a.all_projects();
    projects.sort_by_key(|&p| a.project(p).name.clone());
    for p in projects {
        let students = a.students_for(p);
        if students.is_empty() {
            continue;
        }
        println!("{} ({}/{}):", a.project(p), students.len(), a.capacity(p));
        for &s in students {
            print!("  - {} (GPA {:.2}", a.student(s), a.student(s).gpa);
            if let Some(rank) = a.rank_of(s, p) {
                print!(", rank {}", rank + 1);
            }
            println!(")");
        }
        println!();
    }
}

pub fn display_stats(a: &Assignments, run: RunStats) {
    let students = a.students.len();
    let lazy = a.all_students().into_iter().filter(|&s| a.is_lazy(s)).count();
    println!(
        "Students registered/unregistered/total: {}/{}/{}",
        students - lazy,
        lazy,
        students
    );
    println!(
        "Proposals/rejections: {}/{}",
        run.proposals, run.rejections
    );
    let ranks = stats::statistics(a);
    println!("Final ranking (share of matched students):");
    for (rank, (n, (c, percent))) in ranks.iter().zip(stats::cumulative(&ranks)).enumerate() {
        if *n != 0 {
            println!(
                "  - rank {}: {} (cumulative {} - {:.2}%)",
                rank + 1,
                n,
                c,
                percent
            );
        }
    }
}

pub fn display_unmatched(a: &Assignments) {
    let mut students = a.unmatched_students();
    students.sort_by_key(|&s| a.student(s).identifier.clone());
    if !students.is_empty() {
        println!("Unmatched students:");
        for s in students {
            println!("  - {} ({} choices)", a.student(s), a.rankings(s).len());
        }
    }
}

pub fn display_spare_capacity(a: &Assignments) {
    let mut projects = a.filter_projects(|p| a.spare_seats(p) > 0);
    projects.sort_by_key(|&p| a.project(p).name.clone());
    if !projects.is_empty() {
        println!("Projects with spare seats:");
        for p in projects {
            println!("  - {} ({} free)", a.project(p), a.spare_seats(p));
        }
    }
}

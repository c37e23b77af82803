use crate::model::Assignments;

/// Number of matched students per obtained rank, truncated after the last
/// non-empty rank.
pub fn statistics(a: &Assignments) -> Vec<usize> {
    let mut ranks = Vec::new();
    for s in a.all_students() {
        if let Some(rank) = a.project_for(s).and_then(|p| a.rank_of(s, p)) {
            if ranks.len() <= rank {
                ranks.resize(rank + 1, 0);
            }
            ranks[rank] += 1;
        }
    }
    ranks
}

/// Running totals of `ranks` with their share of all matched students.
pub fn cumulative(ranks: &[usize]) -> Vec<(usize, f32)> {
    let total: usize = ranks.iter().sum();
    ranks
        .iter()
        .scan(0, |c, &r| {
            *c += r;
            Some((*c, 100.0 * *c as f32 / total as f32))
        })
        .collect()
}

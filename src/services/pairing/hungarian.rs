// Kuhn-Munkres assignment over a rectangular cost matrix, potentials
// formulation with shortest augmenting paths. O(rows^2 * cols) with
// rows <= cols, which keeps the overall solve in the O(n^3) class.

use ndarray::Array2;

/// Minimum-cost assignment for a `rows x cols` cost matrix with
/// `rows <= cols`. Returns the assigned column for each row.
///
/// Every row ends up matched to exactly one column and no column is
/// reused; the returned assignment minimizes the summed cost over all
/// such matchings.
pub fn minimize(cost: &Array2<f64>) -> Vec<usize> {
    let (rows, cols) = cost.dim();
    debug_assert!(rows <= cols, "cost matrix must have rows <= cols");
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    // Index 0 is a virtual slot: p[j] holds the 1-based row matched to
    // column j, u/v are the dual potentials.
    let mut u = vec![0.0f64; rows + 1];
    let mut v = vec![0.0f64; cols + 1];
    let mut p = vec![0usize; cols + 1];
    let mut way = vec![0usize; cols + 1];

    for i in 1..=rows {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![f64::INFINITY; cols + 1];
        let mut used = vec![false; cols + 1];

        // Grow the alternating tree until a free column is reached.
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;

            for j in 1..=cols {
                if used[j] {
                    continue;
                }
                let reduced = cost[[i0 - 1, j - 1]] - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=cols {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Unwind the augmenting path, flipping matched edges.
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; rows];
    for j in 1..=cols {
        if p[j] != 0 {
            assignment[p[j] - 1] = j - 1;
        }
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn total(cost: &Array2<f64>, assignment: &[usize]) -> f64 {
        assignment
            .iter()
            .enumerate()
            .map(|(row, &col)| cost[[row, col]])
            .sum()
    }

    /// All orderings of `0..n`, for the brute-force oracle.
    fn permutations(n: usize) -> Vec<Vec<usize>> {
        fn build(remaining: &mut Vec<usize>, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            if remaining.is_empty() {
                out.push(current.clone());
                return;
            }
            for i in 0..remaining.len() {
                let item = remaining.remove(i);
                current.push(item);
                build(remaining, current, out);
                current.pop();
                remaining.insert(i, item);
            }
        }
        let mut out = Vec::new();
        build(&mut (0..n).collect(), &mut Vec::new(), &mut out);
        out
    }

    /// Minimum total cost over every possible assignment, by exhaustive
    /// enumeration. Only viable for small matrices.
    fn brute_force_minimum(cost: &Array2<f64>) -> f64 {
        let (rows, cols) = cost.dim();
        permutations(cols)
            .into_iter()
            .map(|perm| {
                (0..rows)
                    .map(|row| cost[[row, perm[row]]])
                    .sum::<f64>()
            })
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_dominant_diagonal() {
        let cost = array![[-0.9, -0.1, -0.1], [-0.1, -0.9, -0.1], [-0.1, -0.1, -0.9]];
        let assignment = minimize(&cost);
        assert_eq!(assignment, vec![0, 1, 2]);
    }

    #[test]
    fn test_forced_off_diagonal() {
        // Greedy row-by-row assignment would pick (0,0) and pay 9 for the
        // second row; the optimum crosses over.
        let cost = array![[1.0, 2.0], [2.0, 9.0]];
        let assignment = minimize(&cost);
        assert_eq!(assignment, vec![1, 0]);
        assert_eq!(total(&cost, &assignment), 4.0);
    }

    #[test]
    fn test_matches_brute_force_on_square_matrices() {
        let cases = vec![
            array![[4.0, 1.0, 3.0], [2.0, 0.0, 5.0], [3.0, 2.0, 2.0]],
            array![
                [-0.31, 0.42, -0.88, 0.07],
                [0.64, -0.55, 0.13, -0.02],
                [-0.71, 0.29, 0.46, -0.93],
                [0.08, -0.17, -0.64, 0.55]
            ],
            array![
                [5.0, 5.0, 5.0, 5.0, 5.0],
                [1.0, 2.0, 3.0, 4.0, 5.0],
                [5.0, 4.0, 3.0, 2.0, 1.0],
                [2.0, 2.0, 2.0, 2.0, 2.0],
                [0.0, 9.0, 0.0, 9.0, 0.0]
            ],
        ];

        for cost in cases {
            let assignment = minimize(&cost);
            let expected = brute_force_minimum(&cost);
            assert!(
                (total(&cost, &assignment) - expected).abs() < 1e-9,
                "suboptimal assignment {assignment:?} for {cost:?}"
            );
        }
    }

    #[test]
    fn test_matches_brute_force_on_rectangular_matrix() {
        let cost = array![
            [0.5, -0.2, 0.9, -0.7, 0.1],
            [-0.4, 0.3, -0.6, 0.8, -0.9],
            [0.2, -0.8, 0.4, -0.1, 0.6]
        ];
        let assignment = minimize(&cost);

        // No column reused
        let mut seen = std::collections::HashSet::new();
        for &col in &assignment {
            assert!(seen.insert(col));
        }

        let expected = brute_force_minimum(&cost);
        assert!((total(&cost, &assignment) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_single_cell() {
        let cost = array![[3.5]];
        assert_eq!(minimize(&cost), vec![0]);
    }

    #[test]
    fn test_empty_matrix() {
        let cost = Array2::<f64>::zeros((0, 0));
        assert!(minimize(&cost).is_empty());
    }
}

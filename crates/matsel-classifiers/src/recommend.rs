//! Exact-match material lookup behind a suitability prediction.
use std::fmt;

use ndarray::Array2;

use crate::dataset::{MaterialDataset, MaterialProperties};
use crate::error::{quoted_list, ModelError};
use crate::models::Classifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    NoneSuitable,
    /// Distinct names, in the order they first appear in the table.
    Suitable(Vec<String>),
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::NoneSuitable => write!(f, "No material suitable for selection"),
            Recommendation::Suitable(names) => write!(
                f,
                "These materials are suitable for selection: {}",
                quoted_list(names)
            ),
        }
    }
}

/// Ask `model` whether `props` is usable; if so, list the suitable
/// materials in `dataset` whose six properties equal `props` exactly.
///
/// Matching is plain `f64` equality on every column, not a nearest-neighbour
/// search.
pub fn recommend_materials(
    props: &MaterialProperties,
    model: &dyn Classifier,
    dataset: &MaterialDataset,
) -> Result<Recommendation, ModelError> {
    let row = props.to_row();
    let x = Array2::from_shape_fn((1, row.len()), |(_, c)| row[c] as f32);
    let prediction = model.predict(&x)?;
    if prediction.first().copied().unwrap_or(0) == 0 {
        return Ok(Recommendation::NoneSuitable);
    }

    let mut names: Vec<String> = Vec::new();
    for ((features, &label), material) in dataset
        .features
        .rows()
        .into_iter()
        .zip(&dataset.labels)
        .zip(&dataset.materials)
    {
        let exact = features.iter().zip(row.iter()).all(|(a, b)| a == b);
        if exact && label == 1 && !names.contains(material) {
            names.push(material.clone());
        }
    }
    log::debug!("{} material(s) match the query exactly", names.len());
    Ok(Recommendation::Suitable(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(i32);

    impl Classifier for Fixed {
        fn predict(&self, x: &Array2<f32>) -> Result<Vec<i32>, ModelError> {
            Ok(vec![self.0; x.nrows()])
        }
    }

    fn steel() -> MaterialProperties {
        MaterialProperties {
            su: 400.0,
            sy: 250.0,
            e: 200000.0,
            g: 80000.0,
            mu: 0.3,
            ro: 7850.0,
        }
    }

    fn table() -> MaterialDataset {
        let s = steel().to_row();
        let mut near = s;
        near[4] = 0.300001;
        let rows = [s, s, s, near, s];
        MaterialDataset {
            features: Array2::from_shape_fn((rows.len(), 6), |(r, c)| rows[r][c]),
            labels: vec![1, 1, 0, 1, 1],
            materials: vec![
                "Steel".into(),
                "Steel".into(),
                "Scrap".into(),
                "Near".into(),
                "Alloy".into(),
            ],
        }
    }

    #[test]
    fn unsuitable_prediction_short_circuits() {
        let rec = recommend_materials(&steel(), &Fixed(0), &table()).unwrap();
        assert_eq!(rec, Recommendation::NoneSuitable);
        assert_eq!(rec.to_string(), "No material suitable for selection");
    }

    #[test]
    fn exact_matches_only_distinct_and_suitable() {
        let rec = recommend_materials(&steel(), &Fixed(1), &table()).unwrap();
        assert_eq!(
            rec,
            Recommendation::Suitable(vec!["Steel".into(), "Alloy".into()])
        );
        assert_eq!(
            rec.to_string(),
            "These materials are suitable for selection: ['Steel', 'Alloy']"
        );
    }

    #[test]
    fn suitable_but_unknown_vector_lists_nothing() {
        let mut props = steel();
        props.su = 401.0;
        let rec = recommend_materials(&props, &Fixed(1), &table()).unwrap();
        assert_eq!(rec, Recommendation::Suitable(vec![]));
    }
}

#[cfg(test)]
mod tests {
    use super::super::taste_map::*;
    use crate::models::Artist;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    fn create_mock_artist(name: &str, genres: Vec<&str>, image: Option<&str>) -> Artist {
        Artist {
            id: name.to_lowercase(),
            name: name.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            popularity: 40,
            image: image.map(|i| i.to_string()),
        }
    }

    #[test]
    fn test_taste_map_needs_two_artists_with_genres() {
        let artists = vec![
            create_mock_artist("Tagged", vec!["pop", "rock"], None),
            create_mock_artist("Untagged", vec![], None),
        ];
        assert!(TasteMapProjector::new(2).project(&artists).is_empty());
        assert!(TasteMapProjector::new(2).project(&[]).is_empty());
    }

    #[test]
    fn test_taste_map_needs_two_distinct_genres() {
        let artists = vec![
            create_mock_artist("One", vec!["pop"], None),
            create_mock_artist("Two", vec!["pop"], None),
            create_mock_artist("Three", vec!["pop"], None),
        ];
        assert!(TasteMapProjector::new(2).project(&artists).is_empty());
    }

    #[test]
    fn test_taste_map_two_artists_single_component() {
        let artists = vec![
            create_mock_artist("Pop Act", vec!["pop"], Some("https://img/pop.jpg")),
            create_mock_artist("Rock Act", vec!["rock"], None),
        ];

        let points = TasteMapProjector::new(2).project(&artists);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "Pop Act");
        assert_eq!(points[0].image.as_deref(), Some("https://img/pop.jpg"));
        assert_relative_eq!(points[0].x, 0.707);
        assert_relative_eq!(points[1].x, -0.707);
        assert_eq!(points[0].y, 0.0);
        assert_eq!(points[1].y, 0.0);
    }

    #[test]
    fn test_taste_map_three_artists_two_components() {
        let artists = vec![
            create_mock_artist("A", vec!["pop", "rock", "indie"], None),
            create_mock_artist("Skipped", vec![], None),
            create_mock_artist("B", vec!["pop"], None),
            create_mock_artist("C", vec!["jazz"], None),
        ];
        // Genre columns: indie, jazz, pop, rock

        let points = TasteMapProjector::new(2).project(&artists);

        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(points[0].genres, vec!["pop", "rock"]);

        // Scores are centred on the origin
        let x_sum: f64 = points.iter().map(|p| p.x).sum();
        let y_sum: f64 = points.iter().map(|p| p.y).sum();
        assert!(x_sum.abs() < 0.005);
        assert!(y_sum.abs() < 0.005);

        // A and C sit at opposite ends of the first axis, B between them
        assert_relative_eq!(points[0].x.abs(), 1.0);
        assert_relative_eq!(points[2].x, -points[0].x);
        assert!(points[1].x.abs() < 0.001);
        assert_relative_eq!(points[1].y.abs(), 0.667);
        assert_relative_eq!(points[0].y, points[2].y);
    }

    #[test]
    fn test_pca_projector_known_coordinates() {
        // Columns: jazz, pop, rock
        let matrix = array![[0.0, 1.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]];

        let coords = PcaProjector.project(&matrix, 2).unwrap();

        assert_eq!(coords.dim(), (3, 2));
        let expected = [[-0.7251, 0.3753], [-0.2654, -0.5127], [0.9905, 0.1374]];
        for (row, values) in expected.iter().enumerate() {
            assert_relative_eq!(coords[[row, 0]], values[0], epsilon = 1e-3);
            assert_relative_eq!(coords[[row, 1]], values[1], epsilon = 1e-3);
        }
    }

    #[test]
    fn test_pca_projector_is_deterministic() {
        let matrix = array![
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0, 0.0],
            [1.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let first = PcaProjector.project(&matrix, 2).unwrap();
        let second = PcaProjector.project(&matrix, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pca_projector_orders_components_by_variance() {
        let matrix = array![
            [1.0, 0.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 1.0],
            [1.0, 0.0, 0.0, 0.0, 1.0],
        ];

        let coords = PcaProjector.project(&matrix, 2).unwrap();
        let (first, second) = (coords.column(0), coords.column(1));

        assert!(first.dot(&first) >= second.dot(&second));
        assert!(first.dot(&second).abs() < 1e-9);
        assert!(first.sum().abs() < 1e-9);
        assert!(second.sum().abs() < 1e-9);
    }

    #[test]
    fn test_pca_projector_identical_rows_project_to_origin() {
        let matrix = array![[1.0, 1.0], [1.0, 1.0]];
        let coords = PcaProjector.project(&matrix, 1).unwrap();
        assert!(coords.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn test_pca_projector_rejects_bad_input() {
        let matrix = array![[1.0, 0.0], [0.0, 1.0]];
        assert!(matches!(
            PcaProjector.project(&matrix, 0),
            Err(ProjectionError::InvalidComponents { .. })
        ));
        assert!(matches!(
            PcaProjector.project(&matrix, 3),
            Err(ProjectionError::InvalidComponents { .. })
        ));

        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            PcaProjector.project(&empty, 1),
            Err(ProjectionError::Shape { rows: 0, cols: 2 })
        );

        let nan = array![[f64::NAN, 0.0], [0.0, 1.0]];
        assert_eq!(PcaProjector.project(&nan, 1), Err(ProjectionError::NonFinite));
    }

    #[test]
    fn test_taste_map_degrades_to_empty_on_projection_failure() {
        let mut projector = MockProjector::new();
        projector
            .expect_project()
            .withf(|matrix, components| matrix.dim() == (2, 2) && *components == 1)
            .times(1)
            .returning(|_, _| Err(ProjectionError::NoConvergence(1000)));

        let artists = vec![
            create_mock_artist("Pop Act", vec!["pop"], None),
            create_mock_artist("Rock Act", vec!["rock"], None),
        ];

        let points = TasteMapProjector::with_projector(projector, 2).project(&artists);
        assert!(points.is_empty());
    }

    #[test]
    fn test_taste_map_rejects_mismatched_projection_shape() {
        let mut projector = MockProjector::new();
        projector
            .expect_project()
            .returning(|_, _| Ok(Array2::zeros((1, 2))));

        let artists = vec![
            create_mock_artist("Pop Act", vec!["pop"], None),
            create_mock_artist("Rock Act", vec!["rock"], None),
        ];

        let points = TasteMapProjector::with_projector(projector, 2).project(&artists);
        assert!(points.is_empty());
    }

    #[test]
    fn test_taste_map_uses_projected_coordinates() {
        let mut projector = MockProjector::new();
        projector
            .expect_project()
            .returning(|_, _| Ok(array![[0.12345, -1.0], [-0.12345, 1.0]]));

        let artists = vec![
            create_mock_artist("Pop Act", vec!["pop", "dance pop", "electropop"], None),
            create_mock_artist("Rock Act", vec!["rock"], None),
        ];

        let points = TasteMapProjector::with_projector(projector, 2).project(&artists);
        assert_relative_eq!(points[0].x, 0.123);
        assert_relative_eq!(points[0].y, -1.0);
        assert_relative_eq!(points[1].x, -0.123);
        assert_eq!(points[0].genres, vec!["pop", "dance pop"]);
    }

    #[test]
    fn test_membership_matrix_layout() {
        let a = create_mock_artist("A", vec!["pop", "rock"], None);
        let b = create_mock_artist("B", vec!["rock"], None);

        let matrix =
            TasteMapProjector::<PcaProjector>::membership_matrix(&[&a, &b], &["pop", "rock"]);
        assert_eq!(matrix, array![[1.0, 1.0], [0.0, 1.0]]);
    }
}

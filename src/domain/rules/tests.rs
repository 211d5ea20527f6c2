// Unit tests for analysis rules

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::domain::model::*;
    use crate::domain::rules::*;

    fn report_with(tags: &[(&str, &str)], streams: Vec<StreamInfo>) -> ProbeReport {
        ProbeReport {
            format: FormatInfo {
                duration: Some(60.0),
                tags: tags
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
            streams,
        }
    }

    fn assert_sorted_unique(values: &[f64]) {
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1], "not strictly increasing: {:?}", values);
        }
    }

    #[test]
    fn test_fallback_boundaries_short_videos() {
        for duration in [0.0, 1.0, 15.5, 29.999, 30.0] {
            assert!(SceneRules::fallback_boundaries(duration).is_empty());
        }
    }

    #[test]
    fn test_fallback_boundaries_medium_videos() {
        for duration in [30.001, 45.0, 90.0, 120.0] {
            assert_eq!(SceneRules::fallback_boundaries(duration), vec![duration / 2.0]);
        }
    }

    #[test]
    fn test_fallback_boundaries_300_seconds() {
        let boundaries = SceneRules::fallback_boundaries(300.0);
        let expected: Vec<f64> = (1..10).map(|i| 300.0 * i as f64 / 10.0).collect();
        assert_eq!(boundaries.len(), 9);
        assert_eq!(boundaries, expected);
    }

    #[test]
    fn test_fallback_boundaries_200_seconds() {
        let boundaries = SceneRules::fallback_boundaries(200.0);
        assert_eq!(boundaries.len(), 5);
        assert_sorted_unique(&boundaries);
        assert!((boundaries[0] - 200.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_boundaries_capped_for_long_videos() {
        let boundaries = SceneRules::fallback_boundaries(7200.0);
        assert_eq!(boundaries.len(), 9);
        assert_eq!(boundaries[0], 720.0);
    }

    #[test]
    fn test_fallback_boundaries_deterministic() {
        assert_eq!(
            SceneRules::fallback_boundaries(431.7),
            SceneRules::fallback_boundaries(431.7)
        );
    }

    #[test]
    fn test_key_moments_offset_into_scene() {
        let moments = SceneRules::key_moments(&[10.0, 20.0], 10.0, 30.0);
        assert_eq!(moments, vec![13.0, 23.0]);
    }

    #[test]
    fn test_key_moments_without_boundaries() {
        assert_eq!(SceneRules::key_moments(&[], 100.0, 100.0), vec![10.0]);
        assert_eq!(SceneRules::key_moments(&[], 20.0, 20.0), vec![4.0]);
    }

    #[test]
    fn test_key_moments_drop_points_past_end() {
        let moments = SceneRules::key_moments(&[59.0], 30.0, 60.0);
        assert_eq!(moments, vec![10.0]);
    }

    #[test]
    fn test_overall_score_extremes() {
        assert!((QualityRules::overall_score(1.0, 0.5, 1.0, 0.0) - 1.0).abs() < 1e-12);
        assert!(QualityRules::overall_score(0.0, 0.0, 0.0, 1.0).abs() < 1e-12);
        assert!(QualityRules::overall_score(0.0, 1.0, 0.0, 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_motion_rules() {
        assert_eq!(MotionRules::intensity(0), 0.0);
        assert_eq!(MotionRules::intensity(50), 0.5);
        assert_eq!(MotionRules::intensity(1000), 1.0);
        assert!(!MotionRules::has_motion(0.1));
        assert!(MotionRules::has_motion(0.11));
    }

    #[test]
    fn test_spherical_tag_wins_regardless_of_aspect_ratio() {
        let report = report_with(&[("ProjectionType", "equirectangular")], vec![StreamInfo::video(1920, 1080)]);
        assert!(SphericalDetector::detect(&report));
    }

    #[test]
    fn test_spherical_tag_match_is_case_insensitive_substring() {
        let mut tags = BTreeMap::new();
        tags.insert("com.google.SPHERICAL-VIDEO.v1".to_string(), "true".to_string());
        assert!(SphericalDetector::has_spherical_tag(&tags));

        let mut tags = BTreeMap::new();
        tags.insert("stereo_mode".to_string(), "mono".to_string());
        assert!(!SphericalDetector::has_spherical_tag(&tags));
    }

    #[test]
    fn test_spherical_tag_values_are_ignored() {
        let report = report_with(&[("comment", "Spherical")], vec![StreamInfo::video(1920, 1080)]);
        assert!(!SphericalDetector::detect(&report));
    }

    #[test]
    fn test_spherical_aspect_ratio_heuristic() {
        assert!(SphericalDetector::detect(&report_with(&[], vec![StreamInfo::video(1920, 960)])));
        assert!(!SphericalDetector::detect(&report_with(&[], vec![StreamInfo::video(1920, 1080)])));
        assert!(SphericalDetector::is_equirectangular(1900, 1000));
        assert!(SphericalDetector::is_equirectangular(2100, 1000));
        assert!(!SphericalDetector::is_equirectangular(2101, 1000));
    }

    #[test]
    fn test_spherical_lookup_failures_are_negative() {
        assert!(!SphericalDetector::detect(&report_with(&[], vec![StreamInfo::audio()])));
        assert!(!SphericalDetector::detect(&report_with(&[], vec![])));

        let missing_height = StreamInfo {
            codec_type: CodecType::Video,
            width: Some(1920),
            height: None,
            duration: None,
        };
        assert!(!SphericalDetector::detect(&report_with(&[], vec![missing_height])));
        assert!(!SphericalDetector::is_equirectangular(1920, 0));
    }

    #[test]
    fn test_recommend_long_good_quality_video() {
        let scenes = SceneAnalysis::estimated(200.0);
        let recommendations =
            ThumbnailRecommender::recommend(&scenes, &QualityMetrics::fallback(), 200.0);

        assert_eq!(recommendations.len(), 5);
        assert_eq!(recommendations[0], 5.0);
        assert!(recommendations.contains(&100.0));
        assert_sorted_unique(&recommendations);
    }

    #[test]
    fn test_recommend_short_video_uses_key_moment_only() {
        let scenes = SceneAnalysis::estimated(20.0);
        let recommendations =
            ThumbnailRecommender::recommend(&scenes, &QualityMetrics::fallback(), 20.0);
        assert_eq!(recommendations, vec![4.0]);
    }

    #[test]
    fn test_recommend_skips_opening_frame_for_poor_quality() {
        let scenes = SceneAnalysis::estimated(50.0);
        let poor = QualityMetrics::from_components(0.0, 0.0, 0.0, 1.0);
        let recommendations = ThumbnailRecommender::recommend(&scenes, &poor, 50.0);
        assert!(!recommendations.contains(&5.0));
        assert_eq!(recommendations, vec![32.5]);
    }

    #[test]
    fn test_recommend_deduplicates_exact_values() {
        // Key moment 31.5 + 45*0.3 lands exactly on the midpoint of a 90s video
        let scenes = SceneAnalysis::detected(vec![31.5], 90.0);
        assert_eq!(scenes.key_moments(), &[45.0]);

        let recommendations =
            ThumbnailRecommender::recommend(&scenes, &QualityMetrics::fallback(), 90.0);
        assert_eq!(recommendations, vec![5.0, 45.0]);
    }

    #[test]
    fn test_recommend_invariants_across_inputs() {
        let qualities = [
            QualityMetrics::fallback(),
            QualityMetrics::from_components(0.1, 0.9, 0.1, 0.9),
            QualityMetrics::from_components(1.0, 0.5, 1.0, 0.0),
        ];
        for duration in [0.0, 5.0, 30.0, 31.0, 60.0, 61.0, 119.0, 200.0, 3600.0] {
            let detected = SceneAnalysis::detected(
                vec![duration * 0.1, duration * 0.35, duration * 0.6, duration * 0.9],
                duration,
            );
            for scenes in [SceneAnalysis::estimated(duration), detected] {
                for quality in &qualities {
                    let recommendations = ThumbnailRecommender::recommend(&scenes, quality, duration);
                    assert!(!recommendations.is_empty());
                    assert!(recommendations.len() <= 5);
                    assert_sorted_unique(&recommendations);
                    assert!(recommendations.iter().all(|t| *t >= 0.0 && *t <= duration));
                }
            }
        }
    }
}

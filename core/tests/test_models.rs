use jumpmetrics_core::models::{AthleteProfile, KeyFrames, TreatInputAs, VideoTiming};
use jumpmetrics_core::{JumpError, ProcessingError, G};

#[test]
fn timing_derives_duration_and_last_frame() {
    let t = VideoTiming::new(30.0, 90).unwrap();
    assert!((t.duration_s() - 3.0).abs() < 1e-12);
    assert_eq!(t.last_frame(), 89);
    assert!((t.frame_to_time(45) - 1.5).abs() < 1e-12);
    assert!(t.contains(89));
    assert!(!t.contains(90));
}

#[test]
fn timing_rejects_bad_values() {
    assert_eq!(VideoTiming::new(0.0, 10).unwrap_err(), JumpError::NonPositiveFps(0.0));
    assert_eq!(VideoTiming::new(30.0, 0).unwrap_err(), JumpError::EmptyVideo);
}

#[test]
fn probe_failure_is_video_io_not_engine() {
    // OpenCV gir 0 fps når filen ikke kan åpnes
    let err = VideoTiming::from_probe(0.0, 0.0, false).unwrap_err();
    assert!(matches!(err, ProcessingError::VideoIo(_)));
    assert!(!err.is_user_correctable());
    assert_eq!(err.user_message(), "The video could not be processed.");

    let err = VideoTiming::from_probe(30.0, f64::NAN, false).unwrap_err();
    assert_eq!(err.reason(), "video_io");
}

#[test]
fn probe_can_floor_fps() {
    let t = VideoTiming::from_probe(29.97, 300.0, true).unwrap();
    assert_eq!(t.fps(), 29.0);
    let t = VideoTiming::from_probe(29.97, 300.0, false).unwrap();
    assert_eq!(t.fps(), 29.97);
    // 0.5 fps blir 0 etter floor
    assert!(VideoTiming::from_probe(0.5, 300.0, true).is_err());
}

#[test]
fn key_frames_must_be_inside_video() {
    let t = VideoTiming::new(30.0, 25).unwrap();
    let err = KeyFrames::new(10, 13, 25, &t).unwrap_err();
    assert_eq!(err, JumpError::FrameOutOfRange { frame: 25, frame_count: 25 });

    let kf = KeyFrames::new(10, 13, 24, &t).unwrap();
    assert_eq!(kf.contact_frames(), 3);
    assert_eq!(kf.flight_frames(), 11);
}

#[test]
fn key_frames_expose_validated_values_read_only() {
    let kf = KeyFrames::ordered(10, 13, 25).unwrap();
    assert_eq!((kf.contact_start(), kf.contact_end(), kf.landing()), (10, 13, 25));

    let echoed = serde_json::to_value(kf).unwrap();
    assert_eq!(echoed["contact_end"], 13);
    assert!(KeyFrames::ordered(13, 10, 25).is_err());
}

#[test]
fn bounds_checked_before_order() {
    let t = VideoTiming::new(30.0, 20).unwrap();
    let err = KeyFrames::new(13, 10, 99, &t).unwrap_err();
    assert_eq!(err.reason(), "frame_out_of_range");
}

#[test]
fn weight_input_is_divided_by_g() {
    let p = AthleteProfile::from_input(70.0, TreatInputAs::WeightKg).unwrap();
    assert!((p.mass_kg - 70.0 / G).abs() < 1e-12);

    let p = AthleteProfile::from_input(70.0, TreatInputAs::MassKg).unwrap();
    assert_eq!(p.mass_kg, 70.0);

    assert_eq!(
        AthleteProfile::from_input(-70.0, TreatInputAs::WeightKg).unwrap_err(),
        JumpError::NonPositiveMass(-70.0)
    );
}

#[test]
fn treat_input_as_serde_names() {
    let v: TreatInputAs = serde_json::from_str("\"weight_kg\"").unwrap();
    assert_eq!(v, TreatInputAs::WeightKg);
    assert_eq!(serde_json::to_string(&TreatInputAs::MassKg).unwrap(), "\"mass_kg\"");
}

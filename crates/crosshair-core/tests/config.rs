// File: crates/crosshair-core/tests/config.rs
// Purpose: Options parsing from JSON, defaults and selector/style validation.

use crosshair_core::{AxisMode, CrosshairError, CrosshairOptions, Extent, Rgba, SendDataOn, WrapperSelector};

#[test]
fn defaults_from_minimal_json() {
    let opts = CrosshairOptions::from_json_str(r#"{ "wrapperSelector": ".crosshairCursorWrapper" }"#).unwrap();
    assert_eq!(opts.axis_mode, AxisMode::Full);
    assert_eq!(opts.send_data_on, SendDataOn::Hover);
    assert!(!opts.click_to_freeze);
    assert_eq!(opts.initial, None);
    assert_eq!(opts.styles.x.height, Extent::Percent(95.0));
    assert_eq!(opts.styles.y.width, Extent::Percent(100.0));
    assert_eq!(opts.styles.x.background_color, Rgba::new(0xde, 0xde, 0xde, 255));
}

#[test]
fn full_options_round_through_json() {
    let json = r##"{
        "wrapperSelector": "#chart",
        "axisMode": "both",
        "sendDataOn": "click",
        "clickToFreeze": true,
        "initial": 2,
        "styles": {
            "x": { "backgroundColor": "#ff000080", "width": "2px", "height": "90%" },
            "y": { "backgroundColor": "#00ff00", "width": "100%", "height": "1px" }
        }
    }"##;
    let opts = CrosshairOptions::from_json_str(json).unwrap();
    assert_eq!(opts.axis_mode, AxisMode::Full);
    assert_eq!(opts.send_data_on, SendDataOn::Click);
    assert!(opts.click_to_freeze);
    assert_eq!(opts.initial, Some(2));
    assert_eq!(opts.styles.x.background_color, Rgba::new(255, 0, 0, 0x80));
    assert_eq!(opts.styles.x.width, Extent::Px(2.0));

    let back = serde_json::to_string(&opts).unwrap();
    assert_eq!(CrosshairOptions::from_json_str(&back).unwrap(), opts);
}

#[test]
fn missing_selector_is_a_config_error() {
    let err = CrosshairOptions::from_json_str(r#"{ "axisMode": "x" }"#).unwrap_err();
    assert!(matches!(err, CrosshairError::Config(_)));
}

#[test]
fn bad_style_values_are_rejected() {
    let json = r##"{ "wrapperSelector": ".w", "styles": { "x": { "backgroundColor": "red", "width": "1px", "height": "95%" } } }"##;
    assert!(CrosshairOptions::from_json_str(json).is_err());
    assert!("12em".parse::<Extent>().is_err());
    assert!("-1px".parse::<Extent>().is_err());
    assert!("#12345".parse::<Rgba>().is_err());
}

#[test]
fn selector_must_be_id_or_class() {
    assert_eq!(WrapperSelector::parse("#main").unwrap(), WrapperSelector::Id("main".into()));
    assert_eq!(WrapperSelector::parse(".wrap").unwrap(), WrapperSelector::Class("wrap".into()));
    for bad in ["bad", "", "#", ".", "div.wrap"] {
        assert!(
            matches!(WrapperSelector::parse(bad), Err(CrosshairError::InvalidSelector(_))),
            "{bad:?} should be rejected"
        );
    }
    assert_eq!(WrapperSelector::parse(".wrap").unwrap().to_string(), ".wrap");
}

#[test]
fn extents_resolve_against_available_space() {
    assert_eq!(Extent::Percent(50.0).resolve(400.0), 200.0);
    assert_eq!(Extent::Px(3.0).resolve(400.0), 3.0);
}

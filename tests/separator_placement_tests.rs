use std::time::Duration;

use approx::assert_relative_eq;
use chart_separators::core::{AxisDirection, LabelSize, PlotArea};
use chart_separators::scene::{AnimatedProperty, LineGeometry, Scene};
use chart_separators::separator::{
    AxisOrigin, Separator, SeparatorAnimationConfig, SeparatorChart, SeparatorState,
};
use chart_separators::{ChartError, ChartResult};

/// Chart whose mapping is `pixel = value + offset`.
struct TestChart {
    plot_area: PlotArea,
    animation: SeparatorAnimationConfig,
    scene: Scene,
    offset: f64,
}

impl TestChart {
    fn new(animation: SeparatorAnimationConfig) -> Self {
        Self {
            plot_area: PlotArea::new(0.0, 0.0, 100.0, 50.0),
            animation,
            scene: Scene::new(),
            offset: 0.0,
        }
    }
}

impl SeparatorChart for TestChart {
    fn to_plot_area(&self, value: f64, _: AxisDirection, _: usize) -> ChartResult<f64> {
        Ok(value + self.offset)
    }

    fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    fn animation(&self) -> SeparatorAnimationConfig {
        self.animation
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}

struct FixedOrigin(f64);

impl AxisOrigin for FixedOrigin {
    fn from_last_axis(&self, _: f64, _: AxisDirection, _: &dyn SeparatorChart) -> ChartResult<f64> {
        Ok(self.0)
    }
}

const LABEL: LabelSize = LabelSize {
    width: 30.0,
    height: 12.0,
};

fn separator(chart: &mut TestChart, value: f64) -> Separator {
    Separator::new(&mut chart.scene, value, format!("{value}"), LABEL, 0).expect("separator")
}

fn label_top(chart: &TestChart, separator: &Separator) -> f64 {
    chart.scene.label(separator.label()).expect("label").top
}

fn label_left(chart: &TestChart, separator: &Separator) -> f64 {
    chart.scene.label(separator.label()).expect("label").left
}

/// Places `value` with `InitialAdd` and marks it as already on screen.
fn on_screen(chart: &mut TestChart, value: f64, direction: AxisDirection) -> Separator {
    let mut separator = separator(chart, value);
    separator
        .place(SeparatorState::InitialAdd, chart, direction, 0, &FixedOrigin(0.0))
        .expect("initial add");
    separator.set_new(false);
    separator
}

#[test]
fn y_separator_spans_plot_width_and_centers_label() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let separator = on_screen(&mut chart, 20.0, AxisDirection::Y);

    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(0.0, 20.0, 100.0, 20.0))
    );
    assert_relative_eq!(label_top(&chart, &separator), 14.0);
}

#[test]
fn x_separator_spans_plot_height_and_centers_label() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let separator = on_screen(&mut chart, 70.0, AxisDirection::X);

    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(70.0, 0.0, 70.0, 50.0))
    );
    assert_relative_eq!(label_left(&chart, &separator), 55.0);
}

#[test]
fn initial_add_sets_geometry_without_animating_or_touching_opacity() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let mut separator = separator(&mut chart, 20.0);
    chart
        .scene
        .set_opacity(separator.label(), 0.4)
        .expect("opacity");

    separator
        .place(
            SeparatorState::InitialAdd,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(90.0),
        )
        .expect("initial add");

    assert_eq!(chart.scene.active_animation_count(), 0);
    assert_eq!(chart.scene.opacity(separator.label()), Some(0.4));
    assert_eq!(chart.scene.opacity(separator.line()), Some(1.0));
    assert_eq!(separator.state(), Some(SeparatorState::InitialAdd));
}

#[test]
fn new_separator_slides_in_from_last_axis_and_fades_in() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let mut separator = separator(&mut chart, 20.0);
    separator
        .place(
            SeparatorState::DrawOrKeep,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(90.0),
        )
        .expect("draw");

    // Start pose comes from the previous axis, not the default geometry.
    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(0.0, 90.0, 100.0, 90.0))
    );
    assert_relative_eq!(label_top(&chart, &separator), 84.0);
    assert_eq!(chart.scene.opacity(separator.label()), Some(0.0));
    assert_eq!(chart.scene.opacity(separator.line()), Some(0.0));

    chart.scene.advance(Duration::from_millis(250));
    let line = chart.scene.line(separator.line()).expect("line");
    assert_relative_eq!(line.y1, 55.0, epsilon = 1e-9);
    assert_relative_eq!(line.y2, 55.0, epsilon = 1e-9);
    assert_relative_eq!(
        chart.scene.opacity(separator.label()).expect("label opacity"),
        0.5,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        chart.scene.opacity(separator.line()).expect("line opacity"),
        0.25,
        epsilon = 1e-9
    );

    chart.scene.advance(Duration::from_millis(250));
    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(0.0, 20.0, 100.0, 20.0))
    );
    assert_relative_eq!(label_top(&chart, &separator), 14.0);
    assert_eq!(chart.scene.opacity(separator.label()), Some(1.0));
    assert!(chart.scene.is_animating(separator.line()));

    chart.scene.advance(Duration::from_millis(500));
    assert_eq!(chart.scene.opacity(separator.line()), Some(1.0));
    assert_eq!(chart.scene.active_animation_count(), 0);
}

#[test]
fn kept_separator_slides_from_its_previous_pose_without_fading() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let mut separator = on_screen(&mut chart, 70.0, AxisDirection::X);

    chart.offset = -20.0;
    separator
        .place(
            SeparatorState::DrawOrKeep,
            &mut chart,
            AxisDirection::X,
            0,
            &FixedOrigin(0.0),
        )
        .expect("keep");

    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(70.0, 0.0, 70.0, 50.0))
    );
    assert!(!chart
        .scene
        .is_animating_property(separator.line(), AnimatedProperty::Opacity));
    assert_eq!(
        chart
            .scene
            .animation_target(separator.line(), AnimatedProperty::LineX1),
        Some(50.0)
    );

    chart.scene.advance(Duration::from_millis(500));
    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(50.0, 0.0, 50.0, 50.0))
    );
    assert_relative_eq!(label_left(&chart, &separator), 35.0);
    assert_eq!(chart.scene.opacity(separator.line()), Some(1.0));
}

#[test]
fn disabled_animation_applies_final_state_for_every_transition() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::disabled());
    let mut separator = separator(&mut chart, 20.0);

    separator
        .place(
            SeparatorState::DrawOrKeep,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(90.0),
        )
        .expect("draw new");
    assert_eq!(chart.scene.active_animation_count(), 0);
    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(0.0, 20.0, 100.0, 20.0))
    );
    assert_eq!(chart.scene.opacity(separator.line()), Some(1.0));

    separator.set_new(false);
    chart.offset = 10.0;
    separator
        .place(
            SeparatorState::DrawOrKeep,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(90.0),
        )
        .expect("keep");
    assert_eq!(chart.scene.active_animation_count(), 0);
    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(0.0, 30.0, 100.0, 30.0))
    );
    assert_relative_eq!(label_top(&chart, &separator), 24.0);
}

#[test]
fn remove_with_disabled_animation_detaches_synchronously() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::disabled());
    let mut separator = on_screen(&mut chart, 20.0, AxisDirection::Y);

    separator
        .place(
            SeparatorState::Remove,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(0.0),
        )
        .expect("remove");

    assert!(separator.is_detached(&chart.scene));
    assert_eq!(separator.removal(), None);
    assert_eq!(chart.scene.active_animation_count(), 0);
    assert_eq!(chart.scene.run_pending_tasks().executed, 0);
}

#[test]
fn remove_fades_out_then_detaches_on_the_render_thread() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let mut separator = on_screen(&mut chart, 20.0, AxisDirection::Y);

    chart.offset = 5.0;
    separator
        .place(
            SeparatorState::Remove,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(0.0),
        )
        .expect("remove");
    assert!(separator.removal().is_some());
    assert_eq!(
        chart
            .scene
            .animation_target(separator.line(), AnimatedProperty::LineY1),
        Some(25.0)
    );

    chart.scene.advance(Duration::from_millis(499));
    assert_eq!(chart.scene.run_pending_tasks().executed, 0);
    assert!(chart.scene.is_attached(separator.line()));

    chart.scene.advance(Duration::from_millis(1));
    assert_eq!(chart.scene.opacity(separator.label()), Some(0.0));
    // Completion is queued; the primitives stay until the queue is drained.
    assert!(chart.scene.is_attached(separator.label()));

    let report = chart.scene.run_pending_tasks();
    assert_eq!(report.executed, 1);
    assert_eq!(report.skipped_stale, 0);
    assert!(separator.is_detached(&chart.scene));
    assert_eq!(chart.scene.attached_count(), 0);
}

#[test]
fn removing_a_new_separator_is_an_invalid_state() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let mut separator = separator(&mut chart, 20.0);

    let err = separator
        .place(
            SeparatorState::Remove,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(0.0),
        )
        .expect_err("remove while new");
    assert!(matches!(err, ChartError::InvalidState(_)));
    assert_eq!(separator.state(), None);
}

#[test]
fn unknown_state_codes_are_rejected() {
    assert!(matches!(
        SeparatorState::try_from(7),
        Err(ChartError::InvalidState(_))
    ));
    assert!(matches!(
        "explode".parse::<SeparatorState>(),
        Err(ChartError::InvalidState(_))
    ));
}

#[test]
fn revival_mid_fade_cancels_the_pending_detach() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let mut separator = on_screen(&mut chart, 20.0, AxisDirection::Y);

    separator
        .place(
            SeparatorState::Remove,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(0.0),
        )
        .expect("remove");
    chart.scene.advance(Duration::from_millis(250));
    assert_relative_eq!(
        chart.scene.opacity(separator.label()).expect("opacity"),
        0.5,
        epsilon = 1e-9
    );

    separator
        .place(
            SeparatorState::DrawOrKeep,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(0.0),
        )
        .expect("revive");
    assert_eq!(separator.removal(), None);
    assert_eq!(
        chart
            .scene
            .animation_target(separator.label(), AnimatedProperty::Opacity),
        Some(1.0)
    );

    chart.scene.advance(Duration::from_millis(500));
    let report = chart.scene.run_pending_tasks();
    assert_eq!(report.executed, 0);
    assert!(chart.scene.is_attached(separator.line()));
    assert!(chart.scene.is_attached(separator.label()));
    assert_eq!(chart.scene.opacity(separator.label()), Some(1.0));
}

#[test]
fn revival_after_fade_completed_skips_the_queued_detach() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::default());
    let mut separator = on_screen(&mut chart, 20.0, AxisDirection::Y);

    separator
        .place(
            SeparatorState::Remove,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(0.0),
        )
        .expect("remove");
    chart.scene.advance(Duration::from_millis(500));

    // Detach is queued but not drained yet when the value comes back.
    separator
        .place(
            SeparatorState::DrawOrKeep,
            &mut chart,
            AxisDirection::Y,
            0,
            &FixedOrigin(0.0),
        )
        .expect("revive");
    let report = chart.scene.run_pending_tasks();
    assert_eq!(report.executed, 0);
    assert_eq!(report.skipped_stale, 1);
    assert!(!separator.is_detached(&chart.scene));

    chart.scene.advance(Duration::from_millis(500));
    assert_eq!(chart.scene.opacity(separator.line()), Some(1.0));
    assert_eq!(chart.scene.opacity(separator.label()), Some(1.0));
}

#[test]
fn initial_add_after_disabled_removal_reattaches_at_full_opacity() {
    let mut chart = TestChart::new(SeparatorAnimationConfig::disabled());
    let mut separator = on_screen(&mut chart, 20.0, AxisDirection::X);
    separator
        .place(
            SeparatorState::Remove,
            &mut chart,
            AxisDirection::X,
            0,
            &FixedOrigin(0.0),
        )
        .expect("remove");
    assert!(separator.is_detached(&chart.scene));

    separator
        .place(
            SeparatorState::InitialAdd,
            &mut chart,
            AxisDirection::X,
            0,
            &FixedOrigin(0.0),
        )
        .expect("re-add");
    assert!(!separator.is_detached(&chart.scene));
    assert_eq!(
        chart.scene.line(separator.line()),
        Some(LineGeometry::new(20.0, 0.0, 20.0, 50.0))
    );
}

#[test]
fn separators_cannot_be_cloned() {
    // Resolves to a single impl only while `Separator` is not `Clone`.
    trait AmbiguousIfClone<Marker> {
        fn check() {}
    }
    impl<T: ?Sized> AmbiguousIfClone<()> for T {}
    impl<T: ?Sized + Clone> AmbiguousIfClone<u8> for T {}

    <Separator as AmbiguousIfClone<_>>::check();
}

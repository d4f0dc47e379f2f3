use circle_player::{
    compute_layout, project_region, AnswerRegion, ContainerGeometry, ImageGeometry, LayoutLock,
    RegionCoords,
};
use proptest::prelude::*;

fn dimension() -> impl Strategy<Value = f64> {
    1.0f64..5000.0
}

proptest! {
    #[test]
    fn painted_area_keeps_image_aspect(
        iw in dimension(), ih in dimension(), cw in dimension(), ch in dimension(),
    ) {
        let image = ImageGeometry::new(iw, ih).unwrap();
        let layout = compute_layout(image, ContainerGeometry::new(cw, ch).unwrap());
        let ratio = layout.painted_width / layout.painted_height;
        prop_assert!((ratio - image.aspect()).abs() <= 1e-3 * image.aspect().max(1.0));
        prop_assert!(layout.painted_width <= cw + 1e-6);
        prop_assert!(layout.painted_height <= ch + 1e-6);
    }

    #[test]
    fn image_is_centred_on_one_axis_only(
        iw in dimension(), ih in dimension(), cw in dimension(), ch in dimension(),
    ) {
        let layout = compute_layout(
            ImageGeometry::new(iw, ih).unwrap(),
            ContainerGeometry::new(cw, ch).unwrap(),
        );
        prop_assert!(layout.x_offset >= 0.0);
        prop_assert!(layout.y_offset >= 0.0);
        prop_assert!(layout.x_offset == 0.0 || layout.y_offset == 0.0);
    }

    #[test]
    fn layout_and_projection_are_deterministic(
        iw in dimension(), ih in dimension(), cw in dimension(), ch in dimension(),
        x in 0.0f64..1000.0, y in 0.0f64..1000.0, w in 0.0f64..500.0, h in 0.0f64..500.0,
    ) {
        let image = ImageGeometry::new(iw, ih).unwrap();
        let container = ContainerGeometry::new(cw, ch).unwrap();
        let first = compute_layout(image, container);
        let second = compute_layout(image, container);
        prop_assert_eq!(first, second);

        let region = AnswerRegion { index: 0, coords: RegionCoords { x, y, w, h } };
        prop_assert_eq!(project_region(&region, &first), project_region(&region, &second));
    }
}

#[test]
fn container_taller_than_image_letterboxes() {
    // 4:3 image in a 1:2 container: image aspect wins, bars above and below.
    let layout = compute_layout(
        ImageGeometry::new(800.0, 600.0).unwrap(),
        ContainerGeometry::new(300.0, 600.0).unwrap(),
    );
    assert!(layout.y_offset > 0.0);
    assert_eq!(layout.x_offset, 0.0);
    assert_eq!(layout.painted_width, 300.0);
    assert_eq!(layout.y_offset, 187.5);
}

#[test]
fn resize_churn_does_not_move_locked_layout() {
    let image = ImageGeometry::new(1024.0, 768.0).unwrap();
    let mut lock = LayoutLock::default();
    let (locked, _) = lock.resolve(image, ContainerGeometry::new(400.001, 500.0).unwrap());

    for width in [400.002, 400.0015, 400.4, 399.7] {
        let (layout, fresh) = lock.resolve(image, ContainerGeometry::new(width, 500.0).unwrap());
        assert!(!fresh, "width {width} should stay locked");
        assert_eq!(layout, locked);
    }
}

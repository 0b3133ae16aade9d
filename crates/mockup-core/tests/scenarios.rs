//! End-to-end editing scenarios driven through the public session API.

use kurbo::{Point, Size};
use mockup_core::assets::ImageResource;
use mockup_core::{
    ApproximateMetrics, BackdropFallback, ConfirmAction, InputEvent, Layer, Product, ProductView,
    Session, SurfaceGeometry, Upload, View,
};

const EPSILON: f64 = 1e-9;

struct Flat;

impl BackdropFallback for Flat {
    fn placeholder(&self, _key: ProductView) -> ImageResource {
        ImageResource::from_rgba(1, 1, vec![240, 240, 240, 255]).unwrap()
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn identity(session: &Session) -> SurfaceGeometry {
    SurfaceGeometry::identity(session.surface_size())
}

fn send(session: &mut Session, event: InputEvent, geometry: &SurfaceGeometry) {
    session.handle_input(&event, geometry, &ApproximateMetrics);
}

fn upload(session: &mut Session) -> mockup_core::LayerId {
    assert!(session.upload_image(Upload::new("image/png", png(8, 8))));
    session.pump_decodes(&Flat);
    session.selected_id().unwrap()
}

#[test]
fn test_text_survives_view_round_trip() {
    let mut session = Session::default();
    let id = session.add_text("HELLO").unwrap();
    let front = session.active();

    session.select_view(View::Back).unwrap();
    assert!(session.active_layers().is_empty());
    assert!(session.selected_layer().is_none());

    session.select_view(View::Front).unwrap();
    assert_eq!(session.active(), front);
    let layers = session.active_layers();
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].id(), id);
    assert_eq!(layers[0].position(), Point::new(300.0, 300.0));
    // The selection does not come back with the view
    assert!(session.selected_layer().is_none());
}

#[test]
fn test_topmost_image_wins() {
    let mut session = Session::default();
    let geometry = identity(&session);
    let a = upload(&mut session);
    let b = upload(&mut session);

    // Overlap both images, then click the shared center
    send(&mut session, InputEvent::PointerDown { position: Point::new(300.0, 300.0) }, &geometry);
    assert_eq!(session.selected_id(), Some(b));
    send(&mut session, InputEvent::PointerUp, &geometry);

    // Move B off to the right; A is now the only layer at the center
    send(&mut session, InputEvent::PointerDown { position: Point::new(300.0, 300.0) }, &geometry);
    send(&mut session, InputEvent::PointerMove { position: Point::new(500.0, 300.0) }, &geometry);
    send(&mut session, InputEvent::PointerUp, &geometry);

    send(&mut session, InputEvent::PointerDown { position: Point::new(300.0, 300.0) }, &geometry);
    assert_eq!(session.selected_id(), Some(a));
}

#[test]
fn test_click_on_empty_space_clears_selection() {
    let mut session = Session::default();
    let geometry = identity(&session);
    session.add_text("HELLO");
    send(&mut session, InputEvent::PointerDown { position: Point::new(5.0, 5.0) }, &geometry);
    assert!(session.selected_id().is_none());
    assert!(session.take_redraw());
}

#[test]
fn test_pinch_scales_text_within_limits() {
    let mut session = Session::default();
    let geometry = identity(&session);
    session.add_text("HELLO");

    let touches = |spread: f64| {
        vec![
            Point::new(300.0 - spread / 2.0, 300.0),
            Point::new(300.0 + spread / 2.0, 300.0),
        ]
    };

    send(&mut session, InputEvent::TouchStart { touches: touches(100.0) }, &geometry);
    send(&mut session, InputEvent::TouchMove { touches: touches(200.0) }, &geometry);
    let size = session.selected_layer().unwrap().as_text().unwrap().font_size;
    assert!((size - 96.0).abs() < EPSILON);

    // Shrinking far past the minimum clamps to 12
    send(&mut session, InputEvent::TouchMove { touches: touches(10.0) }, &geometry);
    let size = session.selected_layer().unwrap().as_text().unwrap().font_size;
    assert!((size - 12.0).abs() < EPSILON);
}

#[test]
fn test_pinch_without_selection_does_nothing() {
    let mut session = Session::default();
    let geometry = identity(&session);
    session.add_text("HELLO");
    session.select_view(View::Back).unwrap();
    session.select_view(View::Front).unwrap();

    send(
        &mut session,
        InputEvent::TouchStart { touches: vec![Point::new(250.0, 300.0), Point::new(350.0, 300.0)] },
        &geometry,
    );
    send(
        &mut session,
        InputEvent::TouchMove { touches: vec![Point::new(200.0, 300.0), Point::new(400.0, 300.0)] },
        &geometry,
    );
    let text = session.active_layers()[0].as_text().unwrap();
    assert!((text.font_size - 48.0).abs() < EPSILON);
}

#[test]
fn test_drag_maps_client_coordinates() {
    let mut session = Session::default();
    // Displayed at half size: one client pixel is two surface units
    let geometry = SurfaceGeometry::new(
        Point::new(100.0, 50.0),
        Size::new(300.0, 300.0),
        session.surface_size(),
    );
    session.add_text("HELLO");

    send(&mut session, InputEvent::PointerDown { position: Point::new(250.0, 200.0) }, &geometry);
    send(&mut session, InputEvent::PointerMove { position: Point::new(260.0, 205.0) }, &geometry);
    send(&mut session, InputEvent::PointerUp, &geometry);

    assert_eq!(session.active_layers()[0].position(), Point::new(320.0, 310.0));
}

#[test]
fn test_double_click_delete_flow() {
    let mut session = Session::default();
    let geometry = identity(&session);
    let keep = session.add_text("KEEP").unwrap();
    let _ = upload(&mut session);

    let request = session
        .handle_input(
            &InputEvent::DoubleClick { position: Point::new(300.0, 300.0) },
            &geometry,
            &ApproximateMetrics,
        )
        .unwrap();
    assert!(matches!(request.action, ConfirmAction::DeleteLayer { .. }));
    assert!(session.resolve(request, true));

    let ids: Vec<_> = session.active_layers().iter().map(Layer::id).collect();
    assert_eq!(ids, vec![keep]);
}

#[test]
fn test_double_click_without_selection() {
    let mut session = Session::default();
    let geometry = identity(&session);
    assert!(session
        .handle_input(
            &InputEvent::DoubleClick { position: Point::new(300.0, 300.0) },
            &geometry,
            &ApproximateMetrics,
        )
        .is_none());
}

#[test]
fn test_double_tap_requests_delete() {
    let mut session = Session::default();
    let geometry = identity(&session);
    session.add_text("HELLO");
    let tap = InputEvent::TouchStart { touches: vec![Point::new(300.0, 300.0)] };

    assert!(session.handle_input(&tap, &geometry, &ApproximateMetrics).is_none());
    session.handle_input(&InputEvent::TouchEnd, &geometry, &ApproximateMetrics);
    let request = session.handle_input(&tap, &geometry, &ApproximateMetrics);
    assert!(request.is_some());
}

#[test]
fn test_clear_view_is_scoped() {
    let mut session = Session::default();
    session.add_text("FRONT");
    session.select_view(View::Back).unwrap();
    session.add_text("BACK");

    let request = session.request_clear();
    assert!(session.resolve(request, true));
    assert!(session.active_layers().is_empty());

    let front = ProductView::new(Product::Tshirt, View::Front).unwrap();
    assert_eq!(session.layers_for(front).len(), 1);
}

#[test]
fn test_cap_views_keep_separate_layers() {
    let mut session = Session::default();
    session.select_product(Product::Cap);
    session.select_view(View::Left).unwrap();
    session.add_text("L");
    session.select_view(View::Right).unwrap();
    assert!(session.active_layers().is_empty());
    assert!(session.select_view(View::Back).is_err());

    session.select_product(Product::Tshirt);
    assert_eq!(session.view(), View::Front);
    assert_eq!(session.model().len(), 1);
}

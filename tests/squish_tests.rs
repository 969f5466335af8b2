// Host-side tests for the hover squish animator and the cursor affordance.

use glam::Vec3;
use reel_web::core::{
    smooth_toward, CursorSink, CursorStyle, HoverState, NodeKind, NoCursor, PointerCursor, Scene,
    SquishAnimator, SquishConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct RecordingCursor(Rc<RefCell<Vec<CursorStyle>>>);

impl CursorSink for RecordingCursor {
    fn apply(&self, style: CursorStyle) {
        self.0.borrow_mut().push(style);
    }
}

fn sphere(scene: &mut Scene) -> reel_web::core::NodeId {
    scene
        .insert(NodeKind::Sphere { radius: 1.0 }, None)
        .unwrap()
}

#[test]
fn smoothing_converges_geometrically() {
    let target = Vec3::splat(1.15);
    let mut cur = Vec3::ONE;
    for k in 1..=20 {
        cur = smooth_toward(cur, target, 0.3);
        let expected = 1.15 - 0.15 * 0.7_f32.powi(k);
        assert!((cur.x - expected).abs() < 1e-5, "frame {k}: {} vs {expected}", cur.x);
    }
    assert!((cur.x - 1.15).abs() < 1e-3);
}

#[test]
fn hover_targets_are_anisotropic() {
    let mut scene = Scene::new();
    let node = sphere(&mut scene);
    let base = Vec3::splat(2.0);
    let mut anim = SquishAnimator::new(node, base, SquishConfig::default(), PointerCursor::new(NoCursor));
    assert_eq!(anim.target(), base);

    anim.pointer_enter();
    let t = anim.target();
    assert!((t.x - 2.3).abs() < 1e-5);
    assert!((t.y - 2.3).abs() < 1e-5);
    assert!((t.z - 1.6).abs() < 1e-5);

    for _ in 0..40 {
        anim.frame(&mut scene).unwrap();
    }
    let s = scene.get(node).unwrap().scale;
    assert!((s - t).abs().max_element() < 1e-4);

    anim.pointer_leave();
    for _ in 0..40 {
        anim.frame(&mut scene).unwrap();
    }
    let s = scene.get(node).unwrap().scale;
    assert!((s - base).abs().max_element() < 1e-4);
}

#[test]
fn first_frame_moves_thirty_percent() {
    let mut scene = Scene::new();
    let node = sphere(&mut scene);
    let mut anim = SquishAnimator::new(node, Vec3::ONE, SquishConfig::default(), PointerCursor::new(NoCursor));
    anim.pointer_enter();
    anim.frame(&mut scene).unwrap();
    let s = anim.current_scale();
    assert!((s.x - 1.045).abs() < 1e-5);
    assert!((s.z - 0.94).abs() < 1e-5);
}

#[test]
fn cancel_returns_to_idle() {
    let mut scene = Scene::new();
    let node = sphere(&mut scene);
    let mut anim = SquishAnimator::new(node, Vec3::ONE, SquishConfig::default(), PointerCursor::new(NoCursor));
    anim.pointer_enter();
    assert_eq!(anim.state(), HoverState::Hovered);
    anim.pointer_cancel();
    assert_eq!(anim.state(), HoverState::Idle);
    assert_eq!(anim.target(), Vec3::ONE);
}

#[test]
fn cursor_is_paired_with_hover() {
    let sink = RecordingCursor::default();
    let cursor = PointerCursor::new(sink.clone());
    let mut scene = Scene::new();
    let node = sphere(&mut scene);
    let mut anim = SquishAnimator::new(node, Vec3::ONE, SquishConfig::default(), cursor.clone());

    anim.pointer_enter();
    anim.pointer_enter(); // repeated enter is ignored
    assert_eq!(cursor.style(), CursorStyle::Pointer);
    anim.pointer_leave();
    anim.pointer_leave();
    assert_eq!(cursor.style(), CursorStyle::Auto);
    assert_eq!(
        *sink.0.borrow(),
        vec![CursorStyle::Pointer, CursorStyle::Auto]
    );
}

#[test]
fn unmount_while_hovered_restores_cursor() {
    let sink = RecordingCursor::default();
    let cursor = PointerCursor::new(sink.clone());
    let mut scene = Scene::new();
    let node = sphere(&mut scene);
    let mut anim = SquishAnimator::new(node, Vec3::ONE, SquishConfig::default(), cursor.clone());
    anim.pointer_enter();
    let returned = anim.unmount();
    assert_eq!(returned, node);
    assert_eq!(cursor.holders(), 0);
    assert_eq!(sink.0.borrow().last(), Some(&CursorStyle::Auto));
}

#[test]
fn shared_cursor_stays_pointer_until_last_release() {
    let sink = RecordingCursor::default();
    let cursor = PointerCursor::new(sink.clone());
    let a = cursor.acquire();
    let b = cursor.acquire();
    drop(a);
    assert_eq!(cursor.style(), CursorStyle::Pointer);
    drop(b);
    assert_eq!(cursor.style(), CursorStyle::Auto);
    assert_eq!(
        *sink.0.borrow(),
        vec![CursorStyle::Pointer, CursorStyle::Auto]
    );
}

#[test]
fn frame_on_removed_node_reports_stale_handle() {
    let mut scene = Scene::new();
    let node = sphere(&mut scene);
    let mut anim = SquishAnimator::new(node, Vec3::ONE, SquishConfig::default(), PointerCursor::new(NoCursor));
    scene.remove(node).unwrap();
    assert!(anim.frame(&mut scene).is_err());
}

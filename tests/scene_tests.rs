// Host-side tests for the retained scene graph.

use glam::Vec3;
use reel_web::core::{NodeKind, Scene, SceneError};

#[test]
fn world_position_composes_parents() {
    let mut scene = Scene::new();
    let group = scene.insert(NodeKind::Group, None).unwrap();
    scene.get_mut(group).unwrap().position = Vec3::new(0.0, 1.0, -2.0);
    let text = scene
        .insert(
            NodeKind::Text {
                content: "React".into(),
                font_size: 1.5,
            },
            Some(group),
        )
        .unwrap();
    scene.get_mut(text).unwrap().position = Vec3::new(0.0, -0.8, 0.0);
    let p = scene.world_position(text).unwrap();
    assert!((p - Vec3::new(0.0, 0.2, -2.0)).length() < 1e-5);
}

#[test]
fn drawables_skip_groups_and_hidden_nodes() {
    let mut scene = Scene::new();
    let group = scene.insert(NodeKind::Group, None).unwrap();
    let a = scene.insert(NodeKind::Sphere { radius: 1.0 }, Some(group)).unwrap();
    let b = scene.insert(NodeKind::Sphere { radius: 1.0 }, Some(group)).unwrap();
    scene.get_mut(b).unwrap().visible = false;
    scene.get_mut(group).unwrap().opacity = 0.5;
    scene.get_mut(a).unwrap().opacity = 0.5;

    let drawables = scene.drawables();
    assert_eq!(drawables.len(), 1);
    assert_eq!(drawables[0].id, a);
    assert!((drawables[0].opacity - 0.25).abs() < 1e-6);

    scene.get_mut(group).unwrap().visible = false;
    assert!(scene.drawables().is_empty());
}

#[test]
fn world_scale_includes_parent_scale() {
    let mut scene = Scene::new();
    let group = scene.insert(NodeKind::Group, None).unwrap();
    scene.get_mut(group).unwrap().scale = Vec3::splat(2.0);
    let s = scene.insert(NodeKind::Sphere { radius: 1.0 }, Some(group)).unwrap();
    scene.get_mut(s).unwrap().scale = Vec3::new(1.0, 1.5, 0.5);
    let d = scene.drawables();
    let scale = d[0].world_scale();
    assert!((scale - Vec3::new(2.0, 3.0, 1.0)).length() < 1e-5);
}

#[test]
fn remove_is_recursive_and_handles_go_stale() {
    let mut scene = Scene::new();
    let group = scene.insert(NodeKind::Group, None).unwrap();
    let child = scene.insert(NodeKind::Sphere { radius: 1.0 }, Some(group)).unwrap();
    scene.remove(group).unwrap();
    assert!(scene.is_empty());
    assert_eq!(scene.get(child).err(), Some(SceneError::StaleNode(child)));
    assert_eq!(scene.remove(group), Err(SceneError::StaleNode(group)));
}

#[test]
fn reused_slot_does_not_alias_old_handle() {
    let mut scene = Scene::new();
    let old = scene.insert(NodeKind::Group, None).unwrap();
    scene.remove(old).unwrap();
    let new = scene.insert(NodeKind::Sphere { radius: 1.0 }, None).unwrap();
    assert_eq!(old.index(), new.index());
    assert!(scene.get(old).is_err());
    assert!(scene.get(new).is_ok());
}

#[test]
fn insert_under_missing_parent_fails() {
    let mut scene = Scene::new();
    let gone = scene.insert(NodeKind::Group, None).unwrap();
    scene.remove(gone).unwrap();
    assert_eq!(
        scene.insert(NodeKind::Group, Some(gone)),
        Err(SceneError::MissingParent(gone))
    );
}

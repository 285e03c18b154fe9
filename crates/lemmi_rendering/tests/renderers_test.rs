//! Both renderers fed from the same live run.

use lemmi_core::{Input, Phase, RunnerConfig, RunnerState};
use lemmi_rendering::{
    Canvas2dRenderer, DrawCommand2d, FrameView, Renderer, Scene3dRenderer,
};

fn renderers() -> Vec<Box<dyn Renderer>> {
    vec![
        Box::<Canvas2dRenderer>::default() as Box<dyn Renderer>,
        Box::<Scene3dRenderer>::default(),
    ]
}

#[test]
fn test_every_object_is_drawn_or_culled() {
    let mut runner = RunnerState::new(RunnerConfig::default(), 21);
    runner.start();
    let mut renderers = renderers();

    for frame in 0..600 {
        if frame % 50 == 0 {
            runner.apply(Input::Jump);
        }
        runner.step(1.0 / 60.0);
        let view = FrameView::capture(&runner);
        for renderer in &mut renderers {
            let stats = renderer.render(&view);
            assert_eq!(
                stats.objects_seen() as usize,
                view.objects.len(),
                "{} frame {frame}",
                renderer.name()
            );
            assert!(stats.draw_calls > 0);
        }
        if runner.phase() == Phase::GameOver {
            break;
        }
    }
}

#[test]
fn test_paused_frame_has_overlay() {
    let mut runner = RunnerState::new(RunnerConfig::default(), 1);
    runner.start();
    runner.step(1.0 / 60.0);
    runner.apply(Input::Pause);

    let mut canvas = Canvas2dRenderer::default();
    canvas.render(&FrameView::capture(&runner));
    assert!(canvas.commands().iter().any(|c| matches!(
        c,
        DrawCommand2d::Text { text, .. } if text == "PAUSED"
    )));
}

#[test]
fn test_spawned_objects_start_culled_in_canvas() {
    // Spawn distance is past the canvas draw distance.
    let mut runner = RunnerState::new(RunnerConfig::default(), 5);
    runner.start();
    while runner.objects().is_empty() {
        runner.step(1.0 / 60.0);
    }
    let mut canvas = Canvas2dRenderer::default();
    let stats = canvas.render(&FrameView::capture(&runner));
    assert_eq!(stats.objects_drawn, 0);
    assert!(stats.culled > 0);
}

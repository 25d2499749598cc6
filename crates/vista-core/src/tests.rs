#[cfg(test)]
mod tests {
    use crate::Color;
    use crate::Rect;
    use crate::Vec2;
    use crate::animation::*;
    use crate::motion::MotionState;
    use crate::scope::*;
    use crate::signal::*;
    use crate::timer::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use web_time::Duration;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(RefCell::new(false));

        let called_clone = called.clone();
        sig.subscribe(move |_| {
            *called_clone.borrow_mut() = true;
        });

        sig.set(42);
        assert!(*called.borrow());
    }

    #[test]
    fn test_signal_unsubscribe_and_read_inside_callback() {
        let sig = signal(1);
        let seen = Rc::new(Cell::new(0));
        let id = sig.subscribe({
            let seen = seen.clone();
            let sig = sig.clone();
            move |v| seen.set(*v + sig.get())
        });

        sig.set(5);
        assert_eq!(seen.get(), 10);

        sig.unsubscribe(id);
        sig.set(7);
        assert_eq!(seen.get(), 10);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_signal_set_if_changed() {
        let sig = signal("a");
        let hits = Rc::new(Cell::new(0));
        sig.subscribe({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        });

        assert!(!sig.set_if_changed("a"));
        assert!(sig.set_if_changed("b"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_signal_subscriber_writes_back() {
        let sig = signal(0);
        sig.subscribe({
            let sig = sig.clone();
            move |v| {
                if *v == 1 {
                    sig.set(2);
                }
            }
        });

        sig.set(1);
        assert_eq!(sig.get(), 2);
    }

    #[test]
    fn test_signal_subscriber_unsubscribes_itself() {
        let sig = signal(0);
        let hits = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<SubId>>> = Rc::new(Cell::new(None));
        let id = sig.subscribe({
            let sig = sig.clone();
            let hits = hits.clone();
            let own_id = own_id.clone();
            move |_| {
                hits.set(hits.get() + 1);
                if let Some(id) = own_id.get() {
                    sig.unsubscribe(id);
                }
            }
        });
        own_id.set(Some(id));

        sig.set(1);
        sig.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            *cleaned_up_clone.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
        scope.dispose();
        assert!(*cleaned_up.borrow());
    }

    #[test]
    fn test_scope_children_disposed_first_and_only_once() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let parent = Scope::new();
        let child = parent.child();

        parent.add_disposer({
            let order = order.clone();
            move || order.borrow_mut().push("parent")
        });
        child.add_disposer({
            let order = order.clone();
            move || order.borrow_mut().push("child")
        });

        parent.dispose();
        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
        assert!(child.is_disposed());
    }

    #[test]
    fn test_disposer_added_after_dispose_runs_immediately() {
        let scope = Scope::new();
        scope.dispose();

        let ran = Rc::new(Cell::new(false));
        scope.add_disposer({
            let ran = ran.clone();
            move || ran.set(true)
        });
        assert!(ran.get());
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));

        assert_eq!(Color::from_rgba_f32(255, 111, 174, 0.5), Color(255, 111, 174, 128));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_rect_intersection_needs_positive_area() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(a.intersects(&Rect::new(50.0, 50.0, 100.0, 100.0)));
        // touching edges only
        assert!(!a.intersects(&Rect::new(100.0, 0.0, 10.0, 10.0)));
        // zero height
        assert!(!a.intersects(&Rect::new(10.0, 10.0, 10.0, 0.0)));
    }

    #[test]
    fn test_rect_outset_negative_shrinks() {
        let r = Rect::new(0.0, 0.0, 1000.0, 800.0).outset(-100.0);
        assert_eq!(r, Rect::new(100.0, 100.0, 800.0, 600.0));

        let collapsed = Rect::new(0.0, 0.0, 100.0, 100.0).outset(-80.0);
        assert_eq!(collapsed.w, 0.0);
        assert!(collapsed.is_empty());
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);
        // advance 250ms
        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        let cont = a.update();
        assert!(!cont);
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_animation_respects_delay() {
        let clock = TestClock::install();
        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear)
            .with_delay(Duration::from_millis(50));
        let mut a = AnimatedValue::new(0.0f32, spec);
        a.set_target(1.0);

        clock.advance(Duration::from_millis(40));
        assert!(a.update());
        assert_eq!(*a.get(), 0.0);

        clock.advance(Duration::from_millis(60));
        a.update();
        assert!((*a.get() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let spec = AnimationSpec::spring();
        let early = spec.progress(Duration::from_millis(50));
        let late = spec.progress(Duration::from_millis(400));
        assert!(early > 0.0 && early < 1.0);
        assert!((late - 1.0).abs() < 0.02);
        assert_eq!(spec.progress(spec.total()), 1.0);

        let over = AnimationSpec::spring_phys(80.0, 300.0, Duration::from_secs(1));
        let p = over.progress(Duration::from_millis(300));
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn test_keyframes_sample_segments() {
        let k = Keyframes::new([0.0f32, -15.0, 10.0, -8.0, 0.0], Easing::Linear);
        assert_eq!(k.sample(0.0), Some(0.0));
        assert_eq!(k.sample(0.25), Some(-15.0));
        assert!((k.sample(0.125).unwrap() + 7.5).abs() < 1e-4);
        assert_eq!(k.sample(1.0), Some(0.0));

        let timed = Keyframes::with_times([0.0f32, 1.0], [0.0, 0.5], Easing::Linear);
        assert_eq!(timed.sample(0.75), Some(1.0));

        let empty: Keyframes<f32> = Keyframes::new([], Easing::Linear);
        assert_eq!(empty.sample(0.5), None);
    }

    #[test]
    fn test_motion_state_interpolate_and_resolve() {
        let from = MotionState::HIDDEN.with_offset(0.0, 30.0).with_scale(0.9);
        let mid = from.interpolate(&MotionState::VISIBLE, 0.5);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!((mid.y - 15.0).abs() < 1e-6);

        let t = MotionState::VISIBLE.with_x_percent(-100.0).resolve(800.0);
        assert_eq!(t.translate_x, -800.0);
        assert_eq!(t.scale_x, 1.0);
    }

    #[test]
    fn test_timeout_fires_once() {
        let clock = TestClock::install();
        let hits = Rc::new(Cell::new(0));
        let _t = set_timeout(Duration::from_millis(3000), {
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        clock.advance(Duration::from_millis(2999));
        assert_eq!(run_due_timers(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(run_due_timers(), 1);
        clock.advance(Duration::from_secs(10));
        assert_eq!(run_due_timers(), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(pending_timers(), 0);
    }

    #[test]
    fn test_interval_keeps_original_schedule() {
        let clock = TestClock::install();
        let start = now();
        let hits = Rc::new(Cell::new(0));
        let timer = set_interval(Duration::from_millis(5000), {
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        clock.advance(Duration::from_millis(5200));
        run_due_timers();
        assert_eq!(hits.get(), 1);
        assert_eq!(next_deadline(), Some(start + Duration::from_millis(10_000)));

        timer.run();
        assert!(timer.is_disposed());
        assert_eq!(next_deadline(), None);
    }

    #[test]
    fn test_timer_cancelled_by_earlier_timer_in_same_pump() {
        let clock = TestClock::install();
        let victim_ran = Rc::new(Cell::new(false));
        let victim = set_timeout(Duration::from_millis(20), {
            let victim_ran = victim_ran.clone();
            move || victim_ran.set(true)
        });
        let _killer = set_timeout(Duration::from_millis(10), move || victim.run());

        clock.advance(Duration::from_millis(30));
        assert_eq!(run_due_timers(), 1);
        assert!(!victim_ran.get());
    }
}

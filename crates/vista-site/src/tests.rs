#[cfg(test)]
mod tests {
    use crate::*;
    use vista_core::{MotionState, Rect, TestClock};
    use vista_motion::{GalleryInput, MotionError, RevealSpec, Viewport};
    use web_time::Duration;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn viewport(scroll_y: f32) -> Viewport {
        Viewport::new(scroll_y, 1280.0, 800.0)
    }

    #[test]
    fn json_overrides_keep_defaults() {
        let config = SiteConfig::from_json(
            r#"{
                "name": "Rahi Homes Annex",
                "slides": [
                    { "source_ref": "/images/lobby.webp", "alt_text": "Lobby", "caption": "Welcome" }
                ],
                "timing": { "popup_delay_ms": 10000 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.name, "Rahi Homes Annex");
        assert_eq!(config.slides.len(), 1);
        assert_eq!(config.timing.popup_delay(), ms(10_000));
        assert_eq!(config.timing.autoplay_interval(), ms(5_000));
        assert_eq!(config.amenities.len(), 12);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = SiteConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(SiteConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(matches!(
            SiteConfig::from_json(r#"{ "slides": [] }"#),
            Err(SiteError::InvalidConfig(_))
        ));
        assert!(matches!(
            SiteConfig::from_json(r#"{ "timing": { "autoplay_interval_ms": 0 } }"#),
            Err(SiteError::InvalidConfig(_))
        ));
        assert!(matches!(
            SiteConfig::from_json(
                r#"{ "sections": [ { "id": "about", "title": "A" }, { "id": "about", "title": "B" } ] }"#
            ),
            Err(SiteError::InvalidConfig(_))
        ));
        assert!(matches!(
            SiteConfig::from_json(r#"{ "sections": [ { "id": "pricing", "title": "P" } ] }"#),
            Err(SiteError::Config(_))
        ));
    }

    #[test]
    fn scrolling_reveals_sections_in_turn() {
        let clock = TestClock::install();
        let mut page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        page.layout(SectionId::Home, Rect::new(0.0, 0.0, 1280.0, 800.0));
        page.layout(SectionId::About, Rect::new(0.0, 800.0, 1280.0, 900.0));
        page.layout(SectionId::Amenities, Rect::new(0.0, 1700.0, 1280.0, 1000.0));

        let about = page.section(SectionId::About).unwrap().clone();
        let amenities = page.section(SectionId::Amenities).unwrap().clone();
        assert!(!about.region.state().has_fired_once);

        assert!(page.scroll(viewport(200.0)));
        assert!(about.region.state().has_fired_once);
        assert!(!amenities.region.state().has_fired_once);

        clock.advance(ms(1_400));
        assert!(about.is_settled());
        assert_eq!(
            amenities.sample("heading"),
            Some(vec![RevealSpec::fade_up().from])
        );

        // Jumping back up leaves the About section revealed.
        page.scroll(viewport(0.0));
        assert_eq!(about.sample("left"), Some(vec![MotionState::VISIBLE]));
    }

    #[test]
    fn open_lightbox_freezes_page_scroll() {
        let _clock = TestClock::install();
        let mut page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        page.scroll(viewport(3_000.0));

        let gallery = page.gallery().unwrap();
        gallery.handle(GalleryInput::SlideClicked).unwrap();
        assert!(page.scroll_lock().is_locked());
        assert!(!page.scroll(viewport(3_500.0)));
        assert_eq!(page.viewport().map(|v| v.scroll_y), Some(3_000.0));

        page.gallery().unwrap().handle(GalleryInput::LightboxBackdrop).unwrap();
        assert!(page.scroll(viewport(3_500.0)));
    }

    #[test]
    fn resize_applies_while_scroll_is_locked() {
        let _clock = TestClock::install();
        let mut page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        page.layout(SectionId::Contact, Rect::new(0.0, 3_800.0, 1280.0, 900.0));
        page.scroll(viewport(3_000.0));
        let contact = page.section(SectionId::Contact).unwrap().clone();
        assert!(!contact.region.state().is_visible);

        page.gallery().unwrap().handle(GalleryInput::SlideClicked).unwrap();
        // Rotating to a tall window brings the contact section into view.
        assert!(!page.scroll(Viewport::new(3_400.0, 800.0, 1280.0)));
        assert_eq!(page.viewport(), Some(Viewport::new(3_000.0, 800.0, 1280.0)));
        assert!(contact.region.state().is_visible);
    }

    #[test]
    fn second_lightbox_is_refused() {
        let _clock = TestClock::install();
        let page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        let other = vista_motion::LightboxController::new(page.scroll_lock().clone());
        other.open("/images/floor_plan.webp").unwrap();
        assert!(matches!(
            page.gallery().unwrap().handle(GalleryInput::SlideClicked),
            Err(MotionError::ScrollLockHeld)
        ));
        assert!(!page.gallery().unwrap().lightbox().is_open());
    }

    #[test]
    fn navbar_navigation_scrolls_page() {
        let _clock = TestClock::install();
        let mut page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        page.layout(SectionId::Contact, Rect::new(0.0, 6_400.0, 1280.0, 900.0));
        page.navbar_mut().toggle_menu();

        assert_eq!(page.navigate(SectionId::Location), None);
        assert!(page.navbar().is_menu_open());

        assert_eq!(page.navigate(SectionId::Contact), Some(6_400.0));
        assert!(!page.navbar().is_menu_open());
        assert!(page.navbar().is_scrolled());
        assert_eq!(page.viewport().map(|v| v.scroll_y), Some(6_400.0));
    }

    #[test]
    fn contact_section_submit_clears_form() {
        let _clock = TestClock::install();
        let mut page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        page.set_contact_field(Field::Name, "Meera");
        page.set_contact_field(Field::Phone, "12345");
        page.set_contact_field(Field::Message, "Looking for a triple room.");
        assert!(page.submit_contact().is_none());
        assert_eq!(
            page.contact_form().errors().phone,
            Some(FieldError::PhoneNotIndianMobile)
        );
        assert_eq!(
            page.contact_form().errors().phone.map(|e| e.to_string()).as_deref(),
            Some("Please enter a valid 10-digit Indian mobile number")
        );

        page.set_contact_field(Field::Phone, "7021000000");
        let request = page.submit_contact().unwrap();
        assert_eq!(request.phone, "7021000000");
        assert_eq!(page.contact_form().value(Field::Message), "");
        assert_eq!(
            page.toaster().messages(),
            vec![SUBMIT_FAILED.to_owned(), SUBMIT_SUCCESS.to_owned()]
        );
    }

    #[test]
    fn popup_cycle_on_the_page_clock() {
        let clock = TestClock::install();
        let page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        let opened = std::rc::Rc::new(std::cell::Cell::new(0));
        page.popup().signal().subscribe({
            let opened = opened.clone();
            move |open| {
                if *open {
                    opened.set(opened.get() + 1);
                }
            }
        });

        clock.advance(ms(3_000));
        page.tick();
        assert!(page.popup().is_open());

        let popup = page.popup();
        popup.set_field(Field::Name, "Dev");
        popup.set_field(Field::Phone, "9000000001");
        popup.set_field(Field::Message, "Can I visit on Sunday?");
        popup.submit().unwrap();

        // Autoplay fires at 5s, the form resets at 5.5s.
        clock.advance(ms(2_500));
        assert_eq!(page.tick(), 2);
        assert!(!page.popup().is_open());
        assert_eq!(opened.get(), 1);
    }
}

use anyhow::Context;
use vista_core::{Rect, TestClock};
use vista_motion::{GalleryInput, Key, Viewport};
use vista_site::{Field, Page, SectionId, SiteConfig};
use web_time::Duration;

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 800.0;
const FRAME: Duration = Duration::from_millis(100);

fn section_height(id: SectionId) -> f32 {
    match id {
        SectionId::Home => HEIGHT,
        SectionId::About | SectionId::Location => 900.0,
        SectionId::Amenities => 1_100.0,
        SectionId::Colleges => 1_000.0,
        SectionId::Gallery => 1_200.0,
        SectionId::Contact => 1_000.0,
    }
}

fn load_config() -> anyhow::Result<SiteConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading site config {path}"))?;
            SiteConfig::from_json(&json).with_context(|| format!("loading site config {path}"))
        }
        None => Ok(SiteConfig::default()),
    }
}

fn frame(clock: &TestClock, page: &Page) {
    clock.advance(FRAME);
    page.tick();
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let clock = TestClock::install();
    let config = load_config()?;
    log::info!("Starting property tour of {}", config.name);

    let ids: Vec<SectionId> = config.sections.iter().map(|s| s.id).collect();
    let mut page = Page::mount(config, Viewport::new(0.0, WIDTH, HEIGHT))?;

    let mut y = 0.0;
    for id in &ids {
        let h = section_height(*id);
        page.layout(*id, Rect::new(0.0, y, WIDTH, h));
        y += h;
    }
    let page_height = y;

    // Scroll down the page like a reader would.
    let mut scroll_y = 0.0;
    while scroll_y + HEIGHT < page_height {
        scroll_y += 150.0;
        page.scroll(Viewport::new(scroll_y, WIDTH, HEIGHT));
        frame(&clock, &page);
        for section in page.sections() {
            if section.region.state().has_fired_once && !section.is_settled() {
                log::debug!("{:?} revealing at scroll {scroll_y}", section.id);
            }
        }
        if page.popup().is_open() && !page.popup().is_submitted() {
            page.popup().close(vista_motion::DismissReason::CloseButton);
            log::info!("popup dismissed at {scroll_y}");
        }
    }

    if let Some(gallery) = page.gallery() {
        gallery.handle(GalleryInput::Next)?;
        gallery.handle(GalleryInput::Key(Key::ArrowRight))?;
        gallery.handle(GalleryInput::SlideClicked)?;
        log::info!(
            "lightbox on {:?} (slide {})",
            gallery.lightbox().active_slide_ref(),
            gallery.state().current_index + 1
        );
        for _ in 0..5 {
            frame(&clock, &page);
        }
        log::info!("lightbox motion: {:?}", gallery.lightbox_motion());
        gallery.handle(GalleryInput::Key(Key::Escape))?;
    }

    if page.navigate(SectionId::Contact).is_some() {
        page.set_contact_field(Field::Name, "Visitor");
        page.set_contact_field(Field::Phone, "9821327143");
        page.set_contact_field(Field::Message, "I would like to book a visit.");
        if let Some(request) = page.submit_contact() {
            log::info!("contact request from {} ({})", request.name, request.phone);
        }
    }

    for _ in 0..50 {
        frame(&clock, &page);
    }
    let decor = page.decorative_frame();
    log::info!(
        "decoration: {} shapes, {} particles, wave at {:.1}%",
        decor.shapes.len(),
        decor.particles.len(),
        decor.wave.x_percent
    );
    log::info!("toasts: {:?}", page.toaster().messages());

    page.unmount();
    log::info!("tour finished");
    Ok(())
}

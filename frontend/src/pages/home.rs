use yew::prelude::*;
use yew_router::prelude::*;
use log::info;
use chrono::Datelike;

use crate::Route;
use crate::catalog::{SERVICES, STATS};
use crate::choreography::{
    use_choreography, Anchor, BreakpointMode, Ease, PinnedTrackSpec, Pose, Result, Score, Stage, Timeline, Tween,
};
use crate::components::booking_form::BookingForm;
use crate::config;

const HERO_IMG: &str = "https://images.unsplash.com/photo-1503376763036-066120622c74?q=80&w=2070&auto=format&fit=crop";
const FOOTER_IMG: &str = "https://images.unsplash.com/photo-1494976388531-d1058494cdd8?q=80&w=2070&auto=format&fit=crop";

/// Landing page choreography: intro loader, hero parallax, manifesto reveal
/// and, on desktop, the pinned works gallery.
pub struct HomeScore;

pub fn works_track() -> PinnedTrackSpec {
    PinnedTrackSpec {
        track_id: "works".to_string(),
        spacer: ".h-spacer".to_string(),
        section: ".h-section".to_string(),
        panels: ".h-item".to_string(),
    }
}

pub fn intro() -> Timeline {
    Timeline::new()
        .at(500.0, Tween::to(".loader-text", Pose::IDENTITY.y_px(-100.0), 1000.0).ease(Ease::Power4In))
        .then(
            -500.0,
            Tween::to(".loader-overlay", Pose::IDENTITY.y_percent(-100.0), 1000.0).ease(Ease::Power4InOut),
        )
        .then(
            -500.0,
            Tween::from(".hero-title span", Pose::IDENTITY.y_px(200.0).skew_y(10.0), 1500.0)
                .ease(Ease::Power4Out)
                .stagger(100.0),
        )
}

fn reveal_size(progress: f64) -> String {
    format!("{:.1}% 100%", progress * 100.0)
}

impl Score for HomeScore {
    fn shared(&self, stage: &mut Stage<'_>) -> Result<()> {
        stage.play(intro());
        stage.scrub(
            "hero-parallax",
            ".hero-section",
            Anchor::top(0.0),
            Anchor::bottom(0.0),
            ".hero-img-inner",
            Pose::IDENTITY,
            Pose::IDENTITY.y_percent(30.0).scale(1.1),
        )?;
        stage.scrub_style(
            "manifesto-reveal",
            ".manifesto-section",
            Anchor::top(0.8),
            Anchor::bottom(0.2),
            ".manifesto-text",
            "background-size",
            reveal_size,
        )?;
        Ok(())
    }

    fn for_mode(&self, mode: BreakpointMode, stage: &mut Stage<'_>) -> Result<()> {
        match mode {
            BreakpointMode::Desktop => stage.pin_track(works_track()),
            BreakpointMode::Mobile => Ok(()),
        }
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let active_service = use_state(|| 0usize);

    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    let choreography = use_choreography((), |_| HomeScore);

    let book_shoot = {
        let choreography = choreography.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            info!("Scrolling to booking form");
            choreography.scroll_to_element("#contact");
        })
    };

    let service = &SERVICES[(*active_service).min(SERVICES.len() - 1)];
    let year = chrono::Local::now().year();

    html! {
        <div class="home">
            <style>
                {r#"
                    .loader-overlay {
                        position: fixed;
                        inset: 0;
                        background: #fff;
                        z-index: 9999;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        overflow: hidden;
                    }
                    html:not([data-smooth-scroll]) .loader-overlay {
                        display: none;
                    }
                    .loader-text {
                        color: #000;
                        font-family: var(--font-display);
                        font-size: 8rem;
                        font-weight: bold;
                        text-transform: uppercase;
                        letter-spacing: -0.05em;
                    }
                    .home-nav {
                        position: fixed;
                        top: 0;
                        width: 100%;
                        padding: 2rem;
                        display: flex;
                        justify-content: space-between;
                        align-items: flex-end;
                        z-index: 50;
                        mix-blend-mode: difference;
                        box-sizing: border-box;
                    }
                    .brand-name {
                        display: block;
                        font-family: var(--font-display);
                        font-size: 1.875rem;
                        font-weight: bold;
                        text-transform: uppercase;
                        line-height: 1;
                    }
                    .brand-city {
                        display: block;
                        font-size: 10px;
                        text-transform: uppercase;
                        letter-spacing: 0.3em;
                        opacity: 0.7;
                    }
                    .book-link {
                        padding: 0.5rem 1.5rem;
                        border: 1px solid rgba(255, 255, 255, 0.3);
                        border-radius: 9999px;
                        font-size: 0.75rem;
                        font-weight: bold;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                        color: #fff;
                        text-decoration: none;
                        transition: all 0.3s;
                    }
                    .book-link:hover {
                        background: #fff;
                        color: #000;
                    }
                    .hero-section {
                        height: 100vh;
                        position: relative;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        padding: 0 2.5rem;
                        overflow: hidden;
                    }
                    .hero-title {
                        position: relative;
                        z-index: 10;
                        font-family: var(--font-display);
                        font-size: 13vw;
                        line-height: 0.8;
                        font-weight: bold;
                        text-transform: uppercase;
                        mix-blend-mode: difference;
                        overflow: hidden;
                    }
                    .hero-title span {
                        display: block;
                    }
                    .hero-title .tagline {
                        font-family: var(--font-serif);
                        font-style: italic;
                        font-size: 6vw;
                        text-transform: none;
                        opacity: 0.8;
                        margin-top: 1rem;
                    }
                    .hero-img {
                        position: absolute;
                        top: 0;
                        right: 0;
                        width: 60vw;
                        height: 100%;
                        overflow: hidden;
                        opacity: 0.6;
                    }
                    .hero-img-inner {
                        width: 100%;
                        height: 120%;
                        background-size: cover;
                        background-position: center;
                    }
                    .manifesto-section {
                        min-height: 60vh;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        padding: 5rem 1.5rem;
                    }
                    .manifesto-text {
                        max-width: 56rem;
                        text-align: center;
                        font-family: var(--font-display);
                        font-size: clamp(2rem, 5vw, 3.75rem);
                        text-transform: uppercase;
                        line-height: 1.2;
                        color: rgba(255, 255, 255, 0.2);
                        background-image: linear-gradient(to right, #fff, #fff);
                        background-repeat: no-repeat;
                        background-size: 0% 100%;
                        -webkit-background-clip: text;
                        background-clip: text;
                    }
                    .eyebrow {
                        color: #ef4444;
                        font-weight: bold;
                        text-transform: uppercase;
                        letter-spacing: 0.3em;
                        font-size: 0.75rem;
                        margin-bottom: 2rem;
                    }
                    .services {
                        position: relative;
                        padding: 8rem 1.5rem;
                        border-top: 1px solid rgba(255, 255, 255, 0.1);
                        display: flex;
                        gap: 2.5rem;
                    }
                    .services-intro {
                        width: 33%;
                        position: relative;
                        z-index: 10;
                    }
                    .services-list {
                        width: 67%;
                        position: relative;
                        z-index: 10;
                    }
                    .service-entry {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        padding: 2.5rem 0;
                        border-bottom: 1px solid rgba(255, 255, 255, 0.1);
                        color: #fff;
                        text-decoration: none;
                        transition: border-color 0.3s;
                    }
                    .service-entry:hover {
                        border-color: #dc2626;
                    }
                    .service-entry h4 {
                        font-family: var(--font-display);
                        font-size: clamp(2.25rem, 5vw, 3.75rem);
                        text-transform: uppercase;
                        margin: 0;
                        transition: transform 0.3s;
                    }
                    .service-entry:hover h4 {
                        transform: translateX(1rem);
                    }
                    .service-desc {
                        font-size: 0.75rem;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                        opacity: 0;
                        transition: opacity 0.3s;
                    }
                    .service-entry:hover .service-desc {
                        opacity: 1;
                    }
                    .service-bg {
                        position: absolute;
                        top: 0;
                        right: 0;
                        width: 60vw;
                        height: 100%;
                        pointer-events: none;
                        opacity: 0.4;
                    }
                    .service-bg img {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                        filter: grayscale(1);
                        mix-blend-mode: screen;
                    }
                    .h-section {
                        height: 100vh;
                        width: 100%;
                        overflow: hidden;
                        display: flex;
                        background: #050505;
                    }
                    .h-item {
                        flex: 0 0 100vw;
                        height: 100%;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        position: relative;
                        border-right: 1px solid rgba(255, 255, 255, 0.05);
                        box-sizing: border-box;
                    }
                    .h-item img {
                        width: 70%;
                        height: 75%;
                        object-fit: cover;
                        filter: grayscale(1);
                        transition: filter 0.7s;
                    }
                    .h-item:hover img {
                        filter: none;
                    }
                    .h-item h3 {
                        position: absolute;
                        bottom: 5rem;
                        left: 5rem;
                        font-family: var(--font-display);
                        font-size: 3.75rem;
                        text-transform: uppercase;
                        mix-blend-mode: difference;
                    }
                    .stats {
                        padding: 5rem 0;
                        border-top: 1px solid rgba(255, 255, 255, 0.1);
                        border-bottom: 1px solid rgba(255, 255, 255, 0.1);
                        display: flex;
                        flex-wrap: wrap;
                        justify-content: space-around;
                        text-align: center;
                        background: #0a0a0a;
                    }
                    .stat-value {
                        display: block;
                        font-family: var(--font-display);
                        font-size: 3rem;
                        font-weight: bold;
                    }
                    .stat-value.accent {
                        color: #dc2626;
                    }
                    .stat-label {
                        font-size: 0.75rem;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                        opacity: 0.6;
                    }
                    .contact {
                        min-height: 80vh;
                        position: relative;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        gap: 3rem;
                        padding: 5rem 1.5rem;
                        overflow: hidden;
                    }
                    .contact-bg {
                        position: absolute;
                        inset: 0;
                        background-size: cover;
                        opacity: 0.1;
                    }
                    .contact h2 {
                        position: relative;
                        font-family: var(--font-display);
                        font-size: clamp(3.75rem, 9vw, 8rem);
                        font-weight: 900;
                        text-transform: uppercase;
                        text-align: center;
                        line-height: 0.9;
                        margin: 0;
                    }
                    .contact-actions {
                        position: relative;
                        display: flex;
                        gap: 1.5rem;
                        flex-wrap: wrap;
                        justify-content: center;
                    }
                    .cta-primary, .cta-secondary {
                        padding: 1.25rem 2.5rem;
                        font-weight: bold;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                        text-decoration: none;
                        transition: all 0.3s;
                    }
                    .cta-primary {
                        background: #fff;
                        color: #000;
                    }
                    .cta-primary:hover {
                        background: #dc2626;
                        color: #fff;
                    }
                    .cta-secondary {
                        border: 1px solid rgba(255, 255, 255, 0.2);
                        color: #fff;
                    }
                    .contact-foot {
                        position: relative;
                        font-size: 0.75rem;
                        color: #6b7280;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                    }
                    @media (max-width: 767px) {
                        .book-link {
                            display: none;
                        }
                        .services {
                            flex-direction: column;
                        }
                        .services-intro, .services-list {
                            width: 100%;
                        }
                        .service-bg {
                            width: 100%;
                            opacity: 0.2;
                        }
                        .h-section {
                            height: auto;
                            flex-direction: column;
                        }
                        .h-item {
                            flex: none;
                            width: 100%;
                            min-height: 70vh;
                        }
                    }
                "#}
            </style>

            <div class="loader-overlay">
                <div class="loader-text">{"Venox."}</div>
            </div>

            <nav class="home-nav">
                <div>
                    <span class="brand-name">{"Venox"}</span>
                    <span class="brand-city">{"Paris based"}</span>
                </div>
                <a href="#contact" class="book-link" onclick={book_shoot}>{"Book a Shoot"}</a>
            </nav>

            <section class="hero-section">
                <h1 class="hero-title">
                    <span class="stroke-white">{"Speed"}</span>
                    <span>{"Legacy"}</span>
                    <span class="tagline">{"& Raw Emotions"}</span>
                </h1>
                <div class="hero-img">
                    <div
                        class="hero-img-inner"
                        style={format!("background-image: url(\"{}\");", HERO_IMG)}
                    ></div>
                </div>
            </section>

            <section class="manifesto-section">
                <div>
                    <p class="eyebrow" style="text-align: center;">{"The Vision"}</p>
                    <h2 class="manifesto-text">
                        {"\"Photography isn't about the camera. It's about the "}
                        <span style="color: #dc2626;">{"drive"}</span>
                        {". My goal is simple: Create visuals that stop the scroll and build your legacy. Fast cars, raw portraits, zero compromise.\""}
                    </h2>
                </div>
            </section>

            <section class="services">
                <div class="services-intro">
                    <p class="eyebrow" style="color: #6b7280;">{"What I do"}</p>
                    <h3 style="font-size: 3rem; text-transform: uppercase; margin-bottom: 2rem;">
                        {"Select"}<br/>{"Your"}<br/>{"Style"}
                    </h3>
                    <p style="font-size: 0.875rem; color: #9ca3af; line-height: 1.6; max-width: 20rem;">
                        {"Chaque projet est unique. Je m'adapte à votre vision pour délivrer des images qui convertissent et marquent les esprits."}
                    </p>
                </div>
                <div class="services-list">
                    {
                        SERVICES.iter().enumerate().map(|(index, service)| {
                            let onmouseenter = {
                                let active_service = active_service.clone();
                                Callback::from(move |_: MouseEvent| active_service.set(index))
                            };
                            html! {
                                <div {onmouseenter}>
                                    <Link<Route> to={Route::Work { slug: service.slug.to_string() }} classes="service-entry">
                                        <div>
                                            <span style="font-size: 0.75rem; color: #ef4444; font-family: monospace;">{service.number}</span>
                                            <h4>{service.title}</h4>
                                        </div>
                                        <span class="service-desc">{format!("{} ➝", service.desc)}</span>
                                    </Link<Route>>
                                </div>
                            }
                        }).collect::<Html>()
                    }
                </div>
                <div class="service-bg">
                    <img src={service.img} alt="Service" />
                </div>
            </section>

            <div class="h-spacer">
                <section class="h-section">
                    <div class="h-item" style="flex-direction: column; align-items: flex-start; padding: 0 4rem; background: #080808;">
                        <span class="eyebrow" style="color: rgba(255, 255, 255, 0.4);">{"Latest Works"}</span>
                        <h2 style="font-size: 3rem; text-transform: uppercase;">{"Visual"}<br/>{"Proof"}</h2>
                    </div>
                    <div class="h-item">
                        <img src="https://images.unsplash.com/photo-1617788138017-80ad40651399?q=80&w=2070&auto=format&fit=crop" alt="Porsche 911" />
                        <h3>{"Porsche 911"}</h3>
                    </div>
                    <div class="h-item">
                        <img src="https://images.unsplash.com/photo-1534528741775-53994a69daeb?q=80&w=1964&auto=format&fit=crop" alt="Night Vision" />
                        <h3>{"Night Vision"}</h3>
                    </div>
                </section>
            </div>

            <section class="stats">
                {
                    STATS.iter().map(|stat| html! {
                        <div>
                            <span class={classes!("stat-value", stat.accent.then(|| "accent"))}>{stat.value}</span>
                            <span class="stat-label">{stat.label}</span>
                        </div>
                    }).collect::<Html>()
                }
            </section>

            <footer id="contact" class="contact">
                <div class="contact-bg" style={format!("background-image: url(\"{}\");", FOOTER_IMG)}></div>
                <p class="eyebrow" style="position: relative; color: #dc2626; margin: 0;">{"Open for commissions"}</p>
                <h2>{"Ready to"}<br/>{"Shoot?"}</h2>
                <div class="contact-actions">
                    <a href={format!("mailto:{}", config::contact_email())} class="cta-primary">{"Email Me"}</a>
                    <a href={config::instagram_url()} target="_blank" class="cta-secondary">{"DM on Instagram"}</a>
                </div>
                <BookingForm />
                <p class="contact-foot">{format!("Paris, France · Worldwide Available · © {} Venox", year)}</p>
            </footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::choreography::surface::{Rect, Surface};
    use crate::choreography::testing::{FakeSurface, ManualScheduler};
    use crate::choreography::{Choreography, ChoreographyConfig};

    fn landing(width: f64) -> Rc<FakeSurface> {
        Rc::new(
            FakeSurface::new(width, 800.0)
                .with_element(".loader-text", Rect::new(300.0, 0.0, 600.0, 160.0))
                .with_element(".loader-overlay", Rect::new(0.0, 0.0, width, 800.0))
                .with_elements(".hero-title span", vec![Rect::new(200.0, 0.0, width, 120.0); 3])
                .with_element(".hero-section", Rect::new(0.0, 0.0, width, 800.0))
                .with_element(".hero-img-inner", Rect::new(0.0, 0.0, width, 960.0))
                .with_element(".manifesto-section", Rect::new(800.0, 0.0, width, 600.0))
                .with_element(".manifesto-text", Rect::new(900.0, 0.0, width, 400.0))
                .with_element(".h-spacer", Rect::new(2_400.0, 0.0, width, 800.0))
                .with_element(".h-section", Rect::new(2_400.0, 0.0, width, 800.0))
                .with_elements(".h-item", vec![Rect::new(2_400.0, 0.0, width, 800.0); 3]),
        )
    }

    #[test]
    fn test_intro_offsets_overlap() {
        let tweens = intro();
        let starts: Vec<f64> = tweens.tweens().iter().map(|t| t.at_ms).collect();
        assert_eq!(starts, vec![500.0, 1_000.0, 1_500.0]);
        assert_eq!(tweens.tweens()[2].end_ms(3), 3_200.0);
    }

    #[test]
    fn test_intro_holds_titles_low_before_first_frame() {
        let surface = landing(1_280.0);
        let scheduler = Rc::new(ManualScheduler::default());
        let _engine = Choreography::mount(ChoreographyConfig::default(), surface.clone(), scheduler, HomeScore);
        assert_eq!(
            surface.style_nth(".hero-title span", 2, "transform").as_deref(),
            Some("translateY(200px) skewY(10deg)")
        );
    }

    #[test]
    fn test_desktop_pins_works_and_mobile_stacks() {
        let surface = landing(1_280.0);
        let scheduler = Rc::new(ManualScheduler::default());
        let engine = Choreography::mount(ChoreographyConfig::default(), surface.clone(), scheduler.clone(), HomeScore);
        assert_eq!(engine.trigger_count(), 3);
        assert_eq!(surface.style(".h-spacer", "padding-bottom").as_deref(), Some("2560px"));

        surface.resize(500.0, 800.0);
        surface.place(".h-item", vec![Rect::new(2_400.0, 0.0, 500.0, 560.0); 3]);
        engine.on_resize();
        assert_eq!(engine.mode(), Some(BreakpointMode::Mobile));
        assert_eq!(engine.trigger_count(), 2);
        assert_eq!(surface.style(".h-spacer", "padding-bottom"), None);
    }

    #[test]
    fn test_manifesto_fills_while_scrolling_through() {
        let surface = landing(1_280.0);
        let scheduler = Rc::new(ManualScheduler::default());
        let engine = Choreography::mount(ChoreographyConfig::default(), surface.clone(), scheduler.clone(), HomeScore);
        // Window runs from 800 - 640 = 160 to 1400 - 160 = 1240.
        engine.scroll_to(700.0);
        scheduler.run(0.0, 400);
        assert_eq!(surface.native_scroll(), 700.0);
        assert_eq!(surface.style(".manifesto-text", "background-size").as_deref(), Some("50.0% 100%"));
        assert_eq!(reveal_size(1.0), "100.0% 100%");
    }
}

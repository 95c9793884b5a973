//! Static portfolio content: services on the landing page, the three
//! project collections and the trust stats.

pub struct Service {
    pub number: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub img: &'static str,
    /// Project page the entry links to.
    pub slug: &'static str,
}

pub static SERVICES: [Service; 3] = [
    Service {
        number: "01",
        title: "Automotive",
        desc: "Commercial & Private Shoots",
        img: "https://images.unsplash.com/photo-1492144534655-ae79c964c9d7?q=80&w=1983&auto=format&fit=crop",
        slug: "automotive",
    },
    Service {
        number: "02",
        title: "Editorial Portrait",
        desc: "Studio & Outdoor Lighting",
        img: "https://images.unsplash.com/photo-1531746020798-e6953c6e8e04?q=80&w=1964&auto=format&fit=crop",
        slug: "portrait",
    },
    Service {
        number: "03",
        title: "Brand Content",
        desc: "Social Media Strategy & Visuals",
        img: "https://images.unsplash.com/photo-1542038784456-1ea8e935640e?q=80&w=2070&auto=format&fit=crop",
        slug: "brand",
    },
];

pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
    pub accent: bool,
}

pub static STATS: [Stat; 3] = [
    Stat { value: "3+", label: "Years Grinding", accent: true },
    Stat { value: "50+", label: "Projects Done", accent: false },
    Stat { value: "100%", label: "Dedication", accent: false },
];

#[derive(Debug, PartialEq)]
pub struct Project {
    pub slug: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub desc: &'static str,
    pub next: &'static str,
    pub images: &'static [&'static str],
}

pub const DEFAULT_SLUG: &str = "automotive";

static PROJECTS: [Project; 3] = [
    Project {
        slug: "automotive",
        title: "Automotive",
        subtitle: "Speed & Legacy",
        desc: "Capturing the raw power of engineering. From the racetrack to the showroom, every curve tells a story of speed.",
        next: "portrait",
        images: &[
            "/pics/car/DSC03037-Enhanced-NR.jpg",
            "/pics/car/_DSC5710.jpg",
            "/pics/car/DSC02570-Enhanced-NR.jpg",
            "/pics/car/DSC01439.jpg",
            "/pics/car/DSC00904.jpg",
            "/pics/car/DSC02671-Enhanced-NR.jpg",
            "/pics/car/IMG_1810-Enhanced-NR.jpg",
            "/pics/car/DSC02707-Enhanced-NR.jpg",
            "/pics/car/DSC03080-Enhanced-NR.jpg",
            "/pics/car/DSC00892.jpg",
            "/pics/car/DSC01449.jpg",
            "/pics/car/DSC01926-Enhanced-NR.jpg",
            "/pics/car/DSC00508.jpg",
            "/pics/car/DSC02558-Enhanced-NR.jpg",
            "/pics/car/DSC00476.jpg",
            "/pics/car/DSC00737.jpg",
            "/pics/car/_DSC5523.jpg",
            "/pics/car/_DSC5469.jpg",
            "/pics/car/DSC00694.jpg",
            "/pics/car/_DSC5389.jpg",
            "/pics/car/DSC03028-Enhanced-NR.jpg",
        ],
    },
    Project {
        slug: "portrait",
        title: "Editorial Portrait",
        subtitle: "The Human Soul",
        desc: "Beyond the face. We look for the story, the emotion, and the unspoken words in every gaze.",
        next: "brand",
        images: &[
            "/pics/portrait/blond1.jpg",
            "/pics/portrait/blond2.jpg",
            "/pics/portrait/blond3.jpg",
            "/pics/portrait/blond4.jpg",
            "/pics/portrait/blond5.jpg",
            "/pics/portrait/blond6.jpg",
            "/pics/portrait/erell1.jpg",
            "/pics/portrait/erell2.jpg",
            "/pics/portrait/erell3.jpg",
            "/pics/portrait/erell4.jpg",
            "/pics/portrait/erell5.jpg",
            "/pics/portrait/erell6.jpg",
            "/pics/portrait/erell7.jpg",
            "/pics/portrait/erell8.jpg",
            "/pics/portrait/erell9.jpg",
            "/pics/portrait/erell10.jpg",
            "/pics/portrait/erell11.jpg",
            "/pics/portrait/casque1.jpg",
            "/pics/portrait/casque2.jpg",
            "/pics/portrait/casque3.jpg",
            "/pics/portrait/casque4.jpg",
        ],
    },
    Project {
        slug: "brand",
        title: "Brand Content",
        subtitle: "Identity & Vision",
        desc: "Elevating brands through visual storytelling. Consistent, powerful, and memorable imagery for the digital age.",
        next: "automotive",
        images: &[
            "/pics/car/IMG_1830-Enhanced-NR.jpg",
            "/pics/car/DSC01428.jpg",
            "/pics/car/DSC02701-Enhanced-NR.jpg",
            "/pics/car/DSC00896.jpg",
            "/pics/car/DSC01417-Enhanced-NR.jpg",
            "/pics/car/DSC00715.jpg",
            "/pics/car/DSC00436.jpg",
            "/pics/car/DSC00748.jpg",
            "/pics/portrait/casque3.jpg",
        ],
    },
];

/// Looks up a collection; unknown slugs get the automotive one.
pub fn project(slug: &str) -> &'static Project {
    PROJECTS
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or(&PROJECTS[0])
}

pub fn next_project(current: &Project) -> &'static Project {
    project(current.next)
}

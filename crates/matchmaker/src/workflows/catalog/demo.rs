use crate::workflows::matchmaking::domain::Candidate;

/// Built-in sample catalog used when no CSV export is configured.
pub fn demo_catalog() -> Vec<Candidate> {
    vec![
        Candidate::new(
            "ultraformer-mpt",
            "Ultraformer MPT",
            "Facial rejuvenation, flaccidity, wrinkles and body contouring",
            "Micro-focused HIFU ultrasound",
        ),
        Candidate::new(
            "venus-legacy",
            "Venus Legacy",
            "Cellulite, flaccidity, wrinkles and body contouring",
            "Multipolar radiofrequency with pulsed electromagnetic fields",
        ),
        Candidate::new(
            "soprano-ice",
            "Soprano Ice Platinum",
            "Hair removal for every skin type",
            "Diode laser",
        ),
        Candidate::new(
            "lumenis-m22",
            "Lumenis M22",
            "Pigmentation, spots, melasma, rosacea and acne scars",
            "IPL with resurfacing laser module",
        ),
        Candidate::new(
            "coolsculpting-elite",
            "CoolSculpting Elite",
            "Localized fat and body contouring",
            "Cryolipolysis",
        ),
        Candidate::new(
            "dermapen-4",
            "Dermapen 4",
            "Acne scars, stretch marks, rejuvenation and wrinkles",
            "Automated microneedling",
        ),
        Candidate::new(
            "celluma-pro",
            "Celluma PRO",
            "Acne, rejuvenation and skin recovery",
            "LED phototherapy panel",
        ),
        Candidate::new(
            "emsculpt-neo",
            "Emsculpt NEO",
            "Body contouring, muscle toning and localized fat",
            "Electrostimulation with synchronized radiofrequency",
        ),
        Candidate::new(
            "storz-d-actor",
            "Storz D-Actor",
            "Cellulite, stretch marks and flaccidity",
            "Radial shockwave",
        ),
        Candidate::new(
            "fotona-4d",
            "Fotona 4D",
            "Rejuvenation, wrinkles, spots and hair removal",
            "Nd:YAG and Er:YAG laser",
        ),
    ]
}

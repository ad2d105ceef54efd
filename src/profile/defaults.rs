//! The compiled-in profile record. Editing this file is how the bundled
//! subject's content is updated; no component needs to change.

use super::{
    Contact, EducationEntry, EducationKind, Family, FamilyMember, PersonalDetails, Profile,
};

const BLOB_BASE: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com";

pub fn sample_profile() -> Profile {
    Profile {
        name: "Chauhan Vishvarajsinh Vikramsinh".into(),
        intro: "Greetings! I am a Computer Engineering graduate currently pursuing my \
                Master's degree in Australia. I come from a traditional Rajput family and \
                value our cultural heritage while embracing modern education and lifestyle."
            .into(),
        profile_image: format!("{BLOB_BASE}/IMG_4350.JPG-lOGP32Ygla7VXlLhFoDCDHlRGputJV.jpeg"),
        additional_images: vec![
            format!("{BLOB_BASE}/IMG_4350.JPG-lOGP32Ygla7VXlLhFoDCDHlRGputJV.jpeg"),
            format!("{BLOB_BASE}/IMG_4351.JPG-lOGP32Ygla7VXlLhFoDCDHlRGputJV.jpeg"),
            format!("{BLOB_BASE}/IMG_4352.JPG-lOGP32Ygla7VXlLhFoDCDHlRGputJV.jpeg"),
            format!("{BLOB_BASE}/IMG_4353.JPG-lOGP32Ygla7VXlLhFoDCDHlRGputJV.jpeg"),
            format!("{BLOB_BASE}/IMG_4354.JPG-lOGP32Ygla7VXlLhFoDCDHlRGputJV.jpeg"),
        ],
        personal_details: PersonalDetails {
            birthdate: "June 27, 2003".into(),
            birthplace: "Himmatnagar, Gujarat".into(),
            height: "5'11\"".into(),
            weight: "65kg".into(),
            education: "B.Tech in Computer Engineering".into(),
            current_status: "Pursuing Master's degree in Australia".into(),
            religion: "Hindu Rajput".into(),
            caste: "Chauhan".into(),
            zodiac_sign: "Taurus (Vrushabh)".into(),
            blood_group: "O+".into(),
            hobbies: "Photography, Traveling, Reading, Technology".into(),
        },
        family: Family {
            father: FamilyMember {
                relation: "Father".into(),
                name: "Chauhan Vikramsinh Natvarsinh".into(),
                occupation: Some("HDFC Bank Senior Manager".into()),
            },
            mother: FamilyMember {
                relation: "Mother".into(),
                name: "Chauhan Daxaba Vikramsinh".into(),
                occupation: Some(
                    "Housewife (From Kukadiya, Previous Surname: Kumpavat)".into(),
                ),
            },
            siblings: vec![FamilyMember {
                relation: "Sister".into(),
                name: "Chauhan YuvraniKuvarba Vikramsinh".into(),
                occupation: None,
            }],
        },
        education: vec![
            EducationEntry {
                degree: "Master of Computer Science".into(),
                institution: "Deakin University, Melbourne, Australia".into(),
                year: "2025 - Present".into(),
                description: "Currently enrolled for Master's degree with focus on advanced \
                              computing technologies."
                    .into(),
                kind: EducationKind::Education,
            },
            EducationEntry {
                degree: "Bachelor of Technology in Computer Engineering".into(),
                institution: "Ganpat University, Gujarat".into(),
                year: "2020 - 2024".into(),
                description: "Graduated with First Class Honours. Specialized in software \
                              development and database management."
                    .into(),
                kind: EducationKind::Education,
            },
            EducationEntry {
                degree: "Academic Excellence Award".into(),
                institution: "Ganpat University".into(),
                year: "2023".into(),
                description: "Awarded for outstanding academic performance and leadership \
                              qualities demonstrated throughout the degree program."
                    .into(),
                kind: EducationKind::Award,
            },
            EducationEntry {
                degree: "Web Developer Intern".into(),
                institution: "Vadodara City Company".into(),
                year: "Summer 2022".into(),
                description: "Worked on developing responsive web applications and contributed \
                              to UI/UX improvement projects."
                    .into(),
                kind: EducationKind::Experience,
            },
        ],
        contact: Contact {
            address: "Ashapura Society, Near Jalaram Mandir, Himmatnagar, Gujarat".into(),
            phone: "9426341610".into(),
            father_phone: "9925141610".into(),
            whatsapp: "https://wa.me/qr/KNTP2PFPIYYUK1".into(),
            instagram: "https://www.instagram.com/mystic.__.vish".into(),
            email: "vishvarajsinh477@gmail.com".into(),
        },
    }
}

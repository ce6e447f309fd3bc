//! Audience descriptor table.
//!
//! Maps a categorical (gender, age bracket) pair onto a fixed marketing-tone
//! sentence that downstream prompt construction interpolates. The table is
//! the product team's copy deck, so the strings are verbatim and only change
//! with a deliberate copy update.

/// Marketing-tone guidance for a (gender, age bracket) pair.
///
/// Pure lookup with no failure mode. `gender = "others"` returns a single
/// fixed description regardless of bracket. Unrecognized genders, or
/// unrecognized brackets under a recognized gender, return the empty string;
/// callers treat empty as "no audience guidance", never as an error.
#[must_use]
pub fn describe(gender: &str, age_bracket: &str) -> &'static str {
    match gender {
        "others" => {
            "The ad should emphasize inclusivity, comfort, and a sense of belonging, appealing to individuals of diverse identities who value style and self-expression across all age groups."
        }
        "female" => match age_bracket {
            "9-18" => {
                "The ad should appeal to young girls with a focus on fun, color, and trendy designs."
            }
            "18-25" => {
                "The ad should emphasize style, comfort, and empowerment, as young women in this age group often look for products that complement their personal style and lifestyle."
            }
            "25-40" => {
                "For women in this age group, the ad should focus on a balance of comfort, elegance, and professional appeal."
            }
            "40-60" => {
                "The ad should emphasize comfort, sophistication, and practicality, appealing to women who value quality and timeless style."
            }
            "60+" => {
                "The ad should highlight comfort, elegance, and the product’s ability to bring relaxation and ease to daily life."
            }
            _ => "",
        },
        "male" => match age_bracket {
            "9-18" => {
                "The ad should appeal to young boys or teens, focusing on energy, coolness, and modern trends."
            }
            "18-25" => {
                "The ad should focus on style, confidence, and boldness, appealing to young men who are exploring their identity and fashion preferences."
            }
            "25-40" => {
                "For men in this age group, the ad should emphasize practicality, style, and versatility."
            }
            "40-60" => {
                "The ad should appeal to men with a focus on quality, durability, and classic style, suitable for both personal and professional settings."
            }
            "60+" => {
                "The ad should highlight comfort, ease of use, and thoughtful gifts for loved ones."
            }
            _ => "",
        },
        _ => "",
    }
}

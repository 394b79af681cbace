//! Seed command - owner account plus a starter catalogue.
//!
//! Safe to run repeatedly: the admin account is only created when missing
//! and oils are only inserted into an empty catalogue.

use rust_decimal::Decimal;

use crate::config::{Config, DEFAULT_SEED_ADMIN_PASSWORD, SEED_ADMIN_USERNAME};
use crate::domain::{NewOil, OilUnit, Password, UserRole};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence, UnitOfWork};

struct SampleOil {
    name_en: &'static str,
    name_my: &'static str,
    description_en: &'static str,
    description_my: &'static str,
    price: i64,
    unit: OilUnit,
    image_url: &'static str,
}

const SAMPLE_OILS: &[SampleOil] = &[
    SampleOil {
        name_en: "Palm Oil",
        name_my: "ထန်းဆီ",
        description_en: "Pure refined palm oil, ideal for cooking and frying. High heat stability.",
        description_my: "သန့်စင်ထားသော ထန်းဆီ၊ ချက်ပြုတ်ရန်နှင့် ကြော်ရန်အတွက် သင့်လျော်သည်။",
        price: 3500,
        unit: OilUnit::Viss,
        image_url: "https://images.unsplash.com/photo-1474979266404-7eaacbcd87c5?w=400",
    },
    SampleOil {
        name_en: "Groundnut Oil",
        name_my: "မြေပဲဆီ",
        description_en: "Premium groundnut oil with natural aroma. Perfect for traditional dishes.",
        description_my: "သဘာဝအနံ့ပါရှိသော အရည်အသွေးမြင့် မြေပဲဆီ။ ရိုးရာအစားအစာများအတွက် အကောင်းဆုံး။",
        price: 5200,
        unit: OilUnit::Viss,
        image_url: "https://images.unsplash.com/photo-1615485500834-bc10199bc7c4?w=400",
    },
    SampleOil {
        name_en: "Sesame Oil",
        name_my: "နှမ်းဆီ",
        description_en: "Cold-pressed sesame oil with rich flavor. Excellent for salads and marinades.",
        description_my: "အအေးညှစ်ထားသော အရသာရှိသော နှမ်းဆီ။ သုပ်နှင့် အခြာများအတွက် အသုံးပြုနိုင်သည်။",
        price: 6800,
        unit: OilUnit::Viss,
        image_url: "https://images.unsplash.com/photo-1608181961051-e7db8e86e0fc?w=400",
    },
    SampleOil {
        name_en: "Sunflower Oil",
        name_my: "နေကြာဆီ",
        description_en: "Light and healthy sunflower oil. Low in saturated fats.",
        description_my: "ပေါ့ပါးပြီး ကျန်းမာသော နေကြာဆီ။ သန္ဓေအဆီနည်းသည်။",
        price: 4500,
        unit: OilUnit::Liter,
        image_url: "https://images.unsplash.com/photo-1593288942460-c2a81d5cc902?w=400",
    },
    SampleOil {
        name_en: "Coconut Oil",
        name_my: "အုန်းဆီ",
        description_en: "Extra virgin coconut oil. Great for cooking and skincare.",
        description_my: "အရည်အသွေးမြင့် အုန်းဆီ။ ချက်ပြုတ်ရန်နှင့် အသားအရေစောင့်ရှောက်ရန် ကောင်းသည်။",
        price: 7500,
        unit: OilUnit::Viss,
        image_url: "https://images.unsplash.com/photo-1520065949650-29a4191fc49b?w=400",
    },
];

impl SampleOil {
    fn to_new_oil(&self) -> NewOil {
        NewOil {
            name_en: self.name_en.to_string(),
            name_my: self.name_my.to_string(),
            description_en: self.description_en.to_string(),
            description_my: self.description_my.to_string(),
            price_per_unit: Decimal::from(self.price),
            unit: self.unit,
            image_url: Some(self.image_url.to_string()),
        }
    }
}

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let admin_password = std::env::var("SEED_ADMIN_PASSWORD")
        .unwrap_or_else(|_| DEFAULT_SEED_ADMIN_PASSWORD.to_string());

    seed(&Persistence::new(db.get_connection()), &admin_password).await
}

/// Insert the admin account and sample oils where absent
pub async fn seed<U: UnitOfWork>(uow: &U, admin_password: &str) -> AppResult<()> {
    let users = uow.users();
    if users.find_by_username(SEED_ADMIN_USERNAME).await?.is_some() {
        tracing::info!(username = SEED_ADMIN_USERNAME, "Admin user already exists");
    } else {
        let hash = Password::new(admin_password)?.into_string();
        users
            .create(SEED_ADMIN_USERNAME.to_string(), hash, UserRole::Admin)
            .await?;
        tracing::info!(username = SEED_ADMIN_USERNAME, "Admin user created");
    }

    let oils = uow.oils();
    let existing = oils.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Catalogue not empty, skipping sample oils");
        return Ok(());
    }
    for sample in SAMPLE_OILS {
        let oil = oils.create(sample.to_new_oil()).await?;
        tracing::info!(oil_id = oil.id, name = %oil.name_en, "Oil created");
    }

    tracing::info!("Seeding completed");
    Ok(())
}

use std::{collections::HashSet, error::Error};

use clap::Parser;
use fake::Fake;
use fake::faker::lorem::raw::{Sentence, Word};
use fake::faker::name::raw::Name;
use fake::locales::EN;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use engine::Engine;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

/// Maximum number of ingredients linked to one seeded recipe.
const MAX_LINKS_PER_RECIPE: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "ricettario_seed")]
#[command(about = "Fill the database with fake recipes and ingredients")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./ricettario.db?mode=rwc"
    )]
    database_url: String,

    /// How many recipes to create.
    #[arg(long, default_value_t = 1000)]
    recipes: usize,

    /// Size of the shared ingredient pool.
    #[arg(long, default_value_t = 50)]
    ingredients: usize,

    /// RNG seed; the same seed produces the same data.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Draw a lorem name not seen before. Single words first, two-word
/// combinations once the short ones run out.
fn next_ingredient_name(rng: &mut ChaCha8Rng, taken: &mut HashSet<String>) -> String {
    loop {
        let word: String = Word(EN).fake_with_rng(rng);
        if taken.insert(word.clone()) {
            return word;
        }

        let second: String = Word(EN).fake_with_rng(rng);
        let combined = format!("{word} {second}");
        if taken.insert(combined.clone()) {
            return combined;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);

    let mut taken = HashSet::new();
    let mut pool = Vec::with_capacity(cli.ingredients);
    while pool.len() < cli.ingredients {
        let name = next_ingredient_name(&mut rng, &mut taken);
        let description: String = Sentence(EN, 3..8).fake_with_rng(&mut rng);

        let ingredient = engine
            .create_ingredient(None, &name, &description, None)
            .await?;
        pool.push(ingredient.id);
    }

    for _ in 0..cli.recipes {
        let name: String = Name(EN).fake_with_rng(&mut rng);
        let description: String = Sentence(EN, 8..20).fake_with_rng(&mut rng);

        let mut linked = pool.clone();
        linked.shuffle(&mut rng);
        let count = rng.random_range(0..=MAX_LINKS_PER_RECIPE.min(linked.len()));
        linked.truncate(count);

        engine
            .create_recipe(None, &name, &description, None, &linked)
            .await?;
    }

    println!("seeded {} recipes over {} ingredients", cli.recipes, pool.len());

    Ok(())
}

use serde::{Deserialize, Serialize};

use crate::coded::coded_enum;

coded_enum! {
    /// Relationship type byte from the relationship table.
    pub enum RelationshipKind {
        Unset = 0 => "Unknown",
        Friend = 1 => "Friend",
        Lover = 2 => "Lover",
        Ex = 3 => "Ex",
        Spouse = 4 => "Spouse",
        SpouseAlt = 5 => "Spouse (1)",
        ExSpouse = 6 => "Ex-spouse",
        ParentChild = 7 => "Parent/Child",
        Sibling = 8 => "Sibling",
        FriendInConflict = 9 => "Friend (in conflict)",
        LoverInConflict = 10 => "Lover (in conflict)",
        SpouseInConflict = 11 => "Spouse (in conflict)",
        BestFriend = 12 => "Best friend",
    }
}

coded_enum! {
    pub enum Gesture {
        Normal = 0 => "Normal",
        Happy = 1 => "Happy",
        Angry = 2 => "Angry",
        Sad = 3 => "Sad",
        InLove = 4 => "In love",
    }
}

/// Stored id for "no food" besides zero.
pub const FOOD_NONE: u16 = 0xFFFF;

/// Display names in selection-list order. Raw ids below 233 that have
/// no entry in the id table index this list directly.
pub const FOOD_NAMES: [&str; 233] = [
    "Ice cream cone",
    "Apple pie",
    "Strawberry",
    "Prawn pilaf",
    "Green tea",
    "Omelette",
    "Orange juice",
    "Castella cake",
    "Chocolate gateau",
    "Mouldy bread",
    "Fried chicken",
    "Spaghetti carbonara",
    "Quiche",
    "Mushroom",
    "Caviar",
    "Milk",
    "Spoilt milk",
    "Gummy candy",
    "Gratin",
    "Creamy stew",
    "Crepe",
    "Grapefruit",
    "Croissant",
    "Tea",
    "Coffee",
    "Rice",
    "Croquettes",
    "Cherries",
    "Salad",
    "Sandwich",
    "Grilled marckerel",
    "Baked potato",
    "Strawberry shortcake",
    "White bread",
    "Watermelon",
    "Tap water",
    "Steak",
    "Sausage",
    "Soft serve ice cream",
    "Tacos",
    "Chocolate",
    "Chocolate sundae",
    "Red chilli pepper",
    "Tofu",
    "Corn on the cob",
    "Doughnut",
    "Banana",
    "Banana skin",
    "Spring rolls",
    "Cheeseburger",
    "Rissole",
    "Pizza",
    "Cracker",
    "Grapes",
    "French fries",
    "Creme caramel",
    "Blue cheese",
    "French toast",
    "Lollipop",
    "Crisps",
    "Drumstick",
    "Macadamia nuts",
    "Spaghetti bolognese",
    "Orange",
    "Fried egg",
    "Peach",
    "Cooked aubergine",
    "Hard-boiled egg",
    "Apple",
    "Meat and patato stew",
    "Tomato juice",
    "Avocado",
    "Bacon",
    "Broccoli",
    "Squid rings",
    "Roast chestnuts",
    "Candyfloss",
    "Cappuccino",
    "Coconut",
    "Corn flakes",
    "Birthday cake",
    "Cheesecake",
    "Kiwi",
    "Lasagne",
    "Macaron",
    "Meatballs",
    "Melon",
    "Custard slice",
    "Muffin",
    "Raw oyster",
    "Paella",
    "Space food",
    "Peanuts",
    "Pear",
    "Pretzel",
    "Risotto",
    "Roast beef",
    "Salami",
    "Escargot",
    "Spaghetti peperoncino",
    "Squid-ink spaghetti",
    "Tiramisu",
    "Toffee apple",
    "Truffle",
    "Roast turkey",
    "Waffle",
    "Yogurt",
    "Jelly",
    "Cola",
    "Pancakes",
    "Instant noodles",
    "Popcorn",
    "Garlic",
    "Stuffed cabbage roll",
    "Protein shake",
    "Tomato",
    "Apple juice",
    "Mango",
    "Hot dog",
    "Cheese",
    "Parma ham",
    "Pineapple",
    "Salmon meuniere",
    "Chilli prawns",
    "Peking duck",
    "Octopus",
    "Green pepper",
    "Stewed beef",
    "Handmade chocolate",
    "Pot-au-feu",
    "Ruined meal",
    "Barbecued meat",
    "Yakitori",
    "Onion gratin soup",
    "Celery",
    "Box of chocolates",
    "Smoothie",
    "Expresso",
    "Honey",
    "Doner kebab",
    "Lemonade",
    "Olives",
    "Polenta",
    "Ravioli",
    "Schnitzel",
    "Roast chicken",
    "Tortilla",
    "Scone",
    "Smoked salmon",
    "Sunflower seeds",
    "Chamomile tea",
    "Hot chocolate",
    "Black Forest gateau",
    "Prawn salad",
    "Pork cutlet",
    "Herring",
    "Liquorice",
    "Mashed potato",
    "Pasta pesto",
    "Danish pastry",
    "Porridge",
    "Brussels sprouts",
    "Clotted cream",
    "Gingerbread cake",
    "Panini",
    "Fudge",
    "Fishcakes",
    "Fried seafood",
    "Olivier salad",
    "Pain au chocolat",
    "Yule log",
    "Roast lamb",
    "English breakfast",
    "Marron",
    "Pandoro",
    "Panettone",
    "Beans on toast",
    "Cherimoya",
    "Bacalao",
    "Cornish pasty",
    "Turron",
    "Fried sardines",
    "Bundt cake",
    "Roast duck",
    "Hake fillet",
    "Natillas",
    "Custard pastry",
    "Rollmop herrings",
    "Ham and asparagus",
    "Baguette",
    "Borscht",
    "Cannoli",
    "Chilli con carne",
    "Chicken tikka masala",
    "Couscous",
    "Creme brulee",
    "Fish and chips",
    "Gazpacho",
    "Mozzarella salad",
    "Mussels",
    "Minestrone",
    "Panna cotta",
    "Beef bourguignon",
    "Marzipan fruit",
    "Gnocchi",
    "Greek salad",
    "Hummus",
    "Melanzane parmigiana",
    "Mince pie",
    "Rice pudding",
    "Sauerkraut",
    "Christmas pudding",
    "Souffle",
    "Churros",
    "Iberian ham",
    "Dates",
    "Mozzarella",
    "Pistachios",
    "Pork pie",
    "Walnuts",
    "Grated carrot",
    "Ratatouille",
    "Sparkling water",
    "Spinach",
    "Tapas",
    "Bread with chocolate spread",
    "Courgette",
    "Gherkins",
    "Saltimbocca",
    "Profiteroles",
    "Mint sweet",
    "Nothing",
    "-Wrong ID-",
];

/// Stored food id of each [`FOOD_NAMES`] entry, ascending.
const FOOD_IDS: [u16; 232] = [
    0, 2, 5, 10, 16, 20, 23, 26, 27, 29, 31, 32, 34, 36, 38, 40, 42, 44, 45, 46, 47, 48, 49, 50,
    51, 53, 54, 56, 58, 61, 62, 63, 66, 67, 69, 70, 73, 76, 77, 80, 86, 87, 89, 90, 91, 92, 96,
    97, 98, 99, 100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 110, 112, 114, 115, 117, 119,
    122, 123, 126, 132, 135, 136, 137, 138, 139, 140, 141, 142, 143, 144, 146, 147, 148, 149,
    150, 151, 152, 153, 154, 155, 156, 157, 158, 159, 160, 161, 162, 163, 164, 165, 166, 167,
    168, 169, 170, 171, 172, 173, 174, 175, 178, 180, 182, 183, 185, 186, 187, 188, 189, 190,
    191, 192, 193, 194, 195, 197, 198, 199, 200, 201, 202, 205, 210, 216, 218, 222, 229, 230,
    231, 232, 233, 234, 235, 236, 237, 238, 239, 240, 241, 242, 243, 244, 245, 246, 247, 248,
    249, 250, 251, 252, 253, 297, 298, 299, 300, 301, 302, 303, 304, 305, 306, 307, 308, 309,
    310, 311, 312, 314, 315, 316, 317, 318, 319, 320, 321, 322, 323, 324, 325, 326, 327, 328,
    329, 330, 331, 332, 333, 334, 335, 336, 337, 338, 340, 342, 343, 344, 345, 346, 347, 348,
    349, 350, 354, 355, 356, 357, 358, 359, 360, 361, 362, 363, 364, 365, 366, 367, 368, 369,
    370, 371, 381, 65535,
];

/// Resolves a stored food id to a display name.
///
/// 0 and 0xFFFF mean "Nothing". Ids missing from the id table fall back to
/// indexing [`FOOD_NAMES`] directly, and past that to `Unknown (id)`.
pub fn food_name(id: u16) -> String {
    if id == 0 || id == FOOD_NONE {
        return "Nothing".to_string();
    }
    if let Ok(index) = FOOD_IDS.binary_search(&id) {
        return FOOD_NAMES[index].to_string();
    }
    match FOOD_NAMES.get(id as usize) {
        Some(name) => (*name).to_string(),
        None => format!("Unknown ({id})"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodPreference {
    pub id: u16,
    pub name: String,
}

impl FoodPreference {
    pub fn from_id(id: u16) -> Self {
        Self {
            id,
            name: food_name(id),
        }
    }

    pub fn is_nothing(&self) -> bool {
        self.id == 0 || self.id == FOOD_NONE
    }
}

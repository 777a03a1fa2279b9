//! Canned reply texts

pub const WELCOME: &str = "🏔️ Welcome to Lambda Adventures!

I'm here to help you plan your next adventure. What would you like to know about?

1️⃣ Adventure Packages
2️⃣ Booking Information
3️⃣ Location Details
4️⃣ Pricing
5️⃣ Contact Support

Just type the number or keyword!";

pub const PACKAGES: &str = "🎒 Our Adventure Packages:

🏔️ *Mountain Trekking*
- Duration: 3-7 days
- Difficulty: Beginner to Expert
- Includes: Guide, Equipment, Meals

🏕️ *Camping Expeditions*
- Duration: 2-5 days
- Perfect for families
- Includes: Tent, Food, Activities

🚣 *Water Adventures*
- Rafting, Kayaking, Fishing
- Half-day to multi-day options
- All skill levels welcome

🏃 *Adventure Sports*
- Rock climbing, Zip-lining
- Professional instructors
- Safety equipment included

Type 'booking' to reserve or 'details' for more info!";

/// Booking overview followed by the first booking prompt
pub const BOOKING_START: &str = "📝 Ready to book your adventure?

Please provide:
1. Your Name
2. Contact Number
3. Preferred Package
4. Number of People
5. Preferred Dates


You can also visit: www.lambdaadventures.com/book

Let's start with your name:";

pub const LOCATIONS: &str = "📍 Our Adventure Locations:

🏔️ *Mountain Base Camp*
- Altitude: 2,500m
- Best Season: Apr-Oct
- Activities: Trekking, Climbing

🏞️ *Riverside Valley*
- Perfect for camping
- Year-round availability
- Activities: Rafting, Fishing

🌲 *Forest Adventure Park*
- Family-friendly
- Adventure sports hub
- Open daily 9AM-6PM

Need directions? Just ask!";

pub const PRICING: &str = "💰 Adventure Pricing:

🏔️ *Mountain Packages*
- 3-day trek: $299/person
- 5-day expedition: $499/person
- 7-day adventure: $699/person

🏕️ *Camping Packages*
- Weekend camp: $149/person
- 3-day camp: $249/person
- 5-day camp: $399/person

🚣 *Water Adventures*
- Half-day: $89/person
- Full-day: $149/person
- Multi-day: $199/person/day

💡 *Group Discounts Available!*
- 5+ people: 10% off
- 10+ people: 15% off
- 20+ people: 20% off

Ready to book? Type 'booking'!";

pub const SUPPORT: &str = "🆘 Lambda Adventures Support:

📧 Email: help@lambdaadventures.com
🌐 Website: www.lambdaadventures.com

🕒 Office Hours:
Monday-Friday: 8AM-8PM
Saturday-Sunday: 9AM-6PM

For emergencies during adventures:
📞 Emergency Line: +91-555-HELP

How else can I help you today?";

pub const MOUNTAIN: &str = "🏔️ Mountain Adventures Details:

Our mountain packages include:
- Professional mountain guides
- High-quality climbing equipment
- Nutritious mountain meals
- Emergency safety gear
- First aid support

🎯 Difficulty Levels:
- Beginner: Easy trails, 3-4 hours daily
- Intermediate: Moderate trails, 5-6 hours daily
- Expert: Challenging peaks, 7-8 hours daily

Best months: April to October
Group size: 4-12 people

Ready to book? Type 'booking'!";

pub const CAMPING: &str = "🏕️ Camping Experience Details:

What's included:
- Premium camping equipment
- Comfortable sleeping arrangements
- Outdoor cooking facilities
- Campfire activities
- Nature walks and games

📍 Camping Locations:
- Riverside sites with water activities
- Forest clearings with hiking trails
- Mountain base camps with stunning views

Perfect for families, friends, and corporate retreats!

Interested? Type 'booking' to reserve!";

pub const WATER: &str = "🚣 Water Adventures Details:

🌊 Activities Available:
- White water rafting (Grade II-IV)
- Kayaking lessons and tours
- Fishing expeditions
- River crossing challenges

⛑️ Safety First:
- Certified water sports instructors
- Life jackets and safety equipment
- Medical support on standby
- Weather monitoring

🎣 Fishing Packages:
- Equipment provided
- Local guide included
- Fresh catch cooking lessons

Ready for the splash? Type 'booking'!";

pub const EMERGENCY: &str = "🆘 EMERGENCY SUPPORT

If you're currently on an adventure and need immediate assistance:

📞 Emergency Hotline: +91-555-HELP
🚨 This line is monitored 24/7

For non-emergency support:
📞 Regular Support: +91-555-LAMBDA

Your safety is our top priority! 🛡️";

pub const DEFAULT: &str = "I'm not sure I understand that. Here's what I can help you with:

1️⃣ Adventure Packages
2️⃣ Booking Information
3️⃣ Location Details
4️⃣ Pricing
5️⃣ Contact Support

Type a number or keyword like 'packages', 'booking', etc.";

// Booking prompts, one per collected field after the name

pub const ASK_CONTACT: &str = "Great! Now please provide your contact number:";

pub const ASK_PACKAGE: &str =
    "Perfect! Which adventure package interests you? (Mountain, Camping, Water, Sports)";

pub const ASK_PEOPLE: &str = "Excellent choice! How many people will be joining the adventure?";

pub const ASK_DATES: &str = "Almost done! What are your preferred dates? (e.g., March 15-17, 2024)";

/// Values shown in the booking confirmation
pub struct Confirmation<'a> {
    pub name: &'a str,
    pub contact: &'a str,
    pub package: &'a str,
    pub people: &'a str,
    pub dates: &'a str,
    pub reference: &'a str,
}

impl Confirmation<'_> {
    pub fn render(&self) -> String {
        let Confirmation {
            name,
            contact,
            package,
            people,
            dates,
            reference,
        } = self;

        format!(
            "🎉 Booking Request Received!

📋 Summary:
👤 Name: {name}
📞 Contact: {contact}
🎒 Package: {package}
👥 People: {people}
📅 Dates: {dates}

✅ Our team will contact you within 2 hours to confirm availability and payment details.

🆔 Booking Reference: {reference}

Thank you for choosing Lambda Adventures! 🏔️"
        )
    }
}

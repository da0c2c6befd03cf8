//! Built-in glossary for robotics build documentation.
//!
//! Sites with their own vocabulary pass a term list through
//! `PipelineOptions::glossary` instead.

use super::dictionary::GlossaryTerm;

const TERMS: &[(&str, &str)] = &[
    // Vendors
    ("WCP", "West Coast Products"),
    ("REV", "REV Robotics"),
    ("TTB", "The Thrifty Bot"),
    ("Redux", "Redux Robotics"),
    ("MCM", "McMaster Carr"),
    // Intake styles
    ("OTB", "\"Over the Bumper\" - A style of intake where you lift the piece over the bumper"),
    ("UTB", "\"Under the Bumper\" - A style of intake where you move the piece under the bumper"),
    // Parts & Components
    ("COTS", "Commercial Off the Shelf - Parts you can buy from a vendor"),
    ("V4B", "\"Virtual 4 Bar\" - Where a second degree of freedom is directly geared off a previous degree of freedom instead of being moved independently or by a linkage"),
    ("C-C", "\"Center to Center\" distance"),
    ("turnbuckle", "A threaded part that goes in between chain links to tension the chain"),
    ("4Bar", "A type of linkage characterized by its 4 pivot points"),
    ("Tube-Nut", "Also known as a \"Star Nut\" - Provides an easy way to put a thread in end of a hollow tube allowing you to bolt the tube to another part"),
    ("Gusset", "Reinforcement plate, usually made of aluminum, used to strengthen connections between two tubes"),
    // Physics & Engineering concepts
    ("COG", "Center of Gravity, also referred to as COM (Center of Mass)"),
    ("Cantilever", "Horizontal element that's supported by one side only"),
    ("Shear", "When forces are applied parallel to the plane of a material, causing breaking of fasteners due to excessive force and stress"),
    ("Torque", "Force that produces rotational movement"),
    ("DP", "Diametral pitch - The number of teeth per inch of the pitch circle"),
    ("Backlash", "'Slop' in a power transmission system; can wiggle back and forth without engaging the whole system"),
    // Axle types
    ("Deadaxle", "A type of axle setup where the axle is fixed in place and/or is not transferring the torque of the system through it"),
    ("Liveaxle", "A type of axle setup where the main torque transfer is through the axle"),
    ("Zombie-Axle", "Typically used on pivots - A zombie axle spins with the mechanism, but is transferring little to no torque through it. Commonly used to put an encoder on the pivot point"),
    // Electronics
    ("PDH", "Power Distribution Hub"),
    ("SparkMAX", "Motor controller for REV motors"),
    ("PWM", "Pulse Width Modulation cable"),
    ("RIO", "roboRIO - The brain of the robot"),
    ("Blinkin", "LED controller for REV"),
    ("Radio", "Device that helps the robot communicate with the driver station"),
    // Manufacturing & Materials
    ("3DP", "Abbreviation for 3D printed or 3D printing"),
    ("Poly", "Abbreviation for polycarbonate"),
    ("PC", "Abbreviation for polycarbonate"),
    ("Stripping", "Process of removing threads or bolt heads, often due to excessive force or wear"),
    ("Tapping", "The process of creating threads in a hole using a tap tool"),
    ("Billet", "Component machined down from a solid block of material"),
    // Robot structure
    ("Brainpan", "Flipped electronics bellypan"),
    ("Bellypan", "Plate for mounting electronics on the underside of your drivebase"),
    ("Hardstop", "A physical limit designed to prevent a mechanism or component from moving beyond a certain point"),
    ("Softstop", "A software-based limit or control mechanism that restricts the movement of a mechanism or component to prevent it from exceeding certain parameters"),
    // Design concepts
    ("Packaging", "The way in which you fit parts of your robot together in a space"),
    ("Parametric", "Designed in a way that uses relationships between steps to maintain design intent"),
];

/// Built-in glossary terms in declaration order.
pub fn default_glossary() -> Vec<GlossaryTerm> {
    TERMS
        .iter()
        .map(|(term, definition)| GlossaryTerm::new(*term, *definition))
        .collect()
}

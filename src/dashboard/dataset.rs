//! Static sales dataset behind the dashboard

use serde::Serialize;

/// One category axis with a value per category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Series {
    pub labels: &'static [&'static str],
    pub values: &'static [u64],
}

impl Series {
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

/// Low-fat and regular sales per outlet type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FatByOutlet {
    pub labels: &'static [&'static str],
    pub low_fat: &'static [u64],
    pub regular: &'static [u64],
}

/// One row of the outlet-type summary table
///
/// Money columns are kept preformatted, as they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutletTypeRow {
    pub outlet_type: &'static str,
    pub sales: &'static str,
    pub items: u64,
    pub avg_sales: &'static str,
    pub rating: f64,
    pub visibility: &'static str,
}

/// Everything the dashboard draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardDataset {
    pub fat_content: Series,
    pub outlet_size: Series,
    pub outlet_location: Series,
    pub item_type: Series,
    pub establishment: Series,
    pub fat_by_outlet: FatByOutlet,
    pub outlet_types: &'static [OutletTypeRow],
}

impl DashboardDataset {
    /// The grocery-chain sales figures shipped with the dashboard
    pub fn standard() -> &'static DashboardDataset {
        &STANDARD
    }
}

static STANDARD: DashboardDataset = DashboardDataset {
    fat_content: Series {
        labels: &["Low Fat", "Regular"],
        values: &[776_319, 425_363],
    },
    outlet_size: Series {
        labels: &["Medium", "Small", "High"],
        values: &[507_908, 444_794, 248_980],
    },
    outlet_location: Series {
        labels: &["Tier 3", "Tier 2", "Tier 1"],
        values: &[472_134, 393_151, 336_397],
    },
    item_type: Series {
        labels: &[
            "Fruits & Veg",
            "Snack Foods",
            "Household",
            "Frozen Foods",
            "Dairy",
            "Canned",
            "Baking Goods",
            "Health & Hygiene",
            "Soft Drinks",
            "Meat",
            "Breads",
            "Hard Drinks",
            "Others",
            "Starchy Foods",
            "Breakfast",
            "Seafood",
        ],
        values: &[
            178_124, 175_433, 135_976, 118_990, 100_891, 90_976, 81_006, 64_029, 59_167, 57_098,
            35_385, 21_150, 20_000, 17_513, 15_597, 9_017,
        ],
    },
    establishment: Series {
        labels: &[
            "1985", "1987", "1997", "1998", "1999", "2001", "2002", "2004", "2007", "2009",
            "2011", "2018", "2022",
        ],
        values: &[
            131_448, 0, 54_083, 132_204, 0, 0, 131_465, 0, 0, 131_532, 0, 204_522, 131_482,
        ],
    },
    fat_by_outlet: FatByOutlet {
        labels: &[
            "Grocery Store",
            "Supermarket Type1",
            "Supermarket Type2",
            "Supermarket Type3",
        ],
        low_fat: &[44_819, 487_148, 87_370, 85_396],
        regular: &[22_285, 300_401, 44_108, 45_325],
    },
    outlet_types: &[
        OutletTypeRow {
            outlet_type: "Supermarket Type1",
            sales: "$787,549",
            items: 5577,
            avg_sales: "$141.21",
            rating: 3.92,
            visibility: "0.060",
        },
        OutletTypeRow {
            outlet_type: "Grocery Store",
            sales: "$151,940",
            items: 1083,
            avg_sales: "$140.30",
            rating: 3.93,
            visibility: "0.100",
        },
        OutletTypeRow {
            outlet_type: "Supermarket Type2",
            sales: "$131,478",
            items: 928,
            avg_sales: "$141.86",
            rating: 3.93,
            visibility: "0.066",
        },
        OutletTypeRow {
            outlet_type: "Supermarket Type3",
            sales: "$130,715",
            items: 935,
            avg_sales: "$139.80",
            rating: 3.91,
            visibility: "0.065",
        },
    ],
};

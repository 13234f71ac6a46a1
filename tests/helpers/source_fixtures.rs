//! Common source fixtures.

pub const PERSON_CLASS: &str = r#"using System;
using MetaSharp;

namespace Demo.Models {
    [MetaCompleteClass]
    public partial class Person {
        public string FirstName { get; }
        public string LastName { get; }
        public int Age { get; set; }
    }
}
"#;

pub const CONTROL_PROPERTIES: &str = r#"using System.Windows;
using MetaSharp;

namespace Demo.Controls {
    [MetaCompleteDependencyProperties]
    public partial class Gauge : DependencyObject {
        static Gauge() {
            DependencyPropertiesRegistrator<Gauge>.New()
                .Register<double>(x => x.Value, out ValueProperty, 0.0)
                .RegisterReadOnly<bool>(x => x.IsFull, out IsFullProperty, false)
                .RegisterAttached<int>(x => x.Row, out RowProperty, 0)
                .RegisterAttachedReadOnly<string>(x => x.Tag, out TagProperty, null);
        }
    }
}
"#;

pub const EXPECTED_CONTROL_OUTPUT: &str = "namespace Demo.Controls {
using System.Windows;
using MetaSharp;

    partial class Gauge {
        public static readonly DependencyProperty ValueProperty;
        public double Value {
            get { return (double)GetValue(ValueProperty); }
            set { SetValue(ValueProperty, value); }
        }

        public static readonly DependencyProperty IsFullProperty;
        static readonly DependencyPropertyKey IsFullPropertyKey;
        public bool IsFull {
            get { return (bool)GetValue(IsFullProperty); }
            private set { SetValue(IsFullPropertyKey, value); }
        }

        public static readonly DependencyProperty RowProperty;
        public static int GetRow(DependencyObject d) {
            return (int)d.GetValue(RowProperty);
        }
        public static void SetRow(DependencyObject d, int value) {
            d.SetValue(RowProperty, value);
        }

        public static readonly DependencyProperty TagProperty;
        static readonly DependencyPropertyKey TagPropertyKey;
        public static string GetTag(DependencyObject d) {
            return (string)d.GetValue(TagProperty);
        }
        static void SetTag(DependencyObject d, string value) {
            d.SetValue(TagPropertyKey, value);
        }
    }
}";
